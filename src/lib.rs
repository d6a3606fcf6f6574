pub mod animation;
pub mod color;
pub mod crossfade;
pub mod entrance;
pub mod gesture;
pub mod hold;
pub mod playback;
pub mod screen;
pub mod toggle;

pub mod prelude {
    pub use crate::animation::{
        Animatable, SpringConfig, SpringState, TimingFunction, Transform, Transition,
    };
    pub use crate::color::Color;
    pub use crate::crossfade::ColorLoop;
    pub use crate::entrance::Entrance;
    pub use crate::gesture::{Gesture, HoldPhase, PointerEvent, PressRecognizer, Rect};
    pub use crate::hold::{HoldPreviewAnimator, HoldSession};
    pub use crate::playback::{Endpoint, PlaybackHandle, PlaybackState, Settled};
    pub use crate::screen::{Screen, ScreenConfig};
    pub use crate::toggle::{PopStyle, ToggleController, ToggleState};
}
