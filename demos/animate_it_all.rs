//! Headless run of the demo screen: entrance choreography, a tap that pops
//! the element open, a short hold that cancels, and a long hold that
//! commits back-to-back with its preview.
//!
//! Run with `RUST_LOG=debug cargo run --example animate_it_all` to watch
//! the state transitions.

use std::time::{Duration, Instant};

use snapback::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let mut screen = Screen::new(ScreenConfig::default());
    let start = Instant::now();
    screen.present(start);

    // Scripted pointer input, relative to presentation time
    let taps = [
        // A tap at 2.0s pops the element open
        (2000u64, PointerEvent::Down { x: 150.0, y: 350.0 }),
        (2060, PointerEvent::Up { x: 150.0, y: 350.0 }),
        // A tap at 3.5s pops it closed again
        (3500, PointerEvent::Down { x: 150.0, y: 350.0 }),
        (3560, PointerEvent::Up { x: 150.0, y: 350.0 }),
        // A short hold at 5.0s previews and cancels
        (5000, PointerEvent::Down { x: 150.0, y: 350.0 }),
        (5400, PointerEvent::Up { x: 150.0, y: 350.0 }),
        // A long hold at 6.5s previews and commits
        (6500, PointerEvent::Down { x: 150.0, y: 350.0 }),
        (7600, PointerEvent::Up { x: 150.0, y: 350.0 }),
    ];
    let mut next_input = 0;

    let mut frame = 0u64;
    loop {
        frame += 1;
        let now = start + FRAME * frame as u32;
        let elapsed_ms = (now - start).as_millis() as u64;

        while next_input < taps.len() && taps[next_input].0 <= elapsed_ms {
            screen.handle_event(taps[next_input].1, now);
            next_input += 1;
        }

        screen.tick(now);

        if frame % 30 == 0 {
            let style = screen.element_style();
            let preview = screen.preview_transform();
            log::info!(
                "t={:>4}ms focused={} scale={:.2} preview={:.2} overlay={:.2} progress={:>3.0}%",
                elapsed_ms,
                screen.focused(),
                style.scale,
                preview.scale.0,
                style.overlay_alpha,
                screen.hold_progress(now),
            );
        }

        if elapsed_ms >= 9000 {
            break;
        }
        std::thread::sleep(FRAME);
    }

    log::info!("final focused={}", screen.focused());
}
