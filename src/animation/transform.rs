use super::Animatable;

/// 2D transformation applied to an element's visual, independent of layout.
///
/// The hold preview drives a `Transform` from identity toward a slight
/// uniform scale; entrance animations drive translation and scale-from-zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in x and y
    pub translate: (f32, f32),
    /// Scale in x and y (1.0 = no scale)
    pub scale: (f32, f32),
    /// Rotation in radians (clockwise)
    pub rotate: f32,
    /// Transform origin as fraction of size (0.5, 0.5 = center)
    pub origin: (f32, f32),
}

impl Transform {
    /// Identity transform (no transformation)
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        scale: (1.0, 1.0),
        rotate: 0.0,
        origin: (0.5, 0.5),
    };

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: (x, y),
            ..Self::IDENTITY
        }
    }

    /// Create a scale transform
    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            scale: (x, y),
            ..Self::IDENTITY
        }
    }

    /// Create a uniform scale transform
    pub fn scale_uniform(scale: f32) -> Self {
        Self::scale(scale, scale)
    }

    /// Create a rotation transform (in radians)
    pub fn rotate(radians: f32) -> Self {
        Self {
            rotate: radians,
            ..Self::IDENTITY
        }
    }

    /// Set the transform origin (default is center: 0.5, 0.5)
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Apply this transform to a point relative to a bounding box
    pub fn apply_to_point(&self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
        let origin_x = width * self.origin.0;
        let origin_y = height * self.origin.1;

        // Translate to origin
        let mut tx = x - origin_x;
        let mut ty = y - origin_y;

        // Apply scale
        tx *= self.scale.0;
        ty *= self.scale.1;

        // Apply rotation
        if self.rotate.abs() > 1e-6 {
            let cos = self.rotate.cos();
            let sin = self.rotate.sin();
            let rx = tx * cos - ty * sin;
            let ry = tx * sin + ty * cos;
            tx = rx;
            ty = ry;
        }

        // Translate back from origin
        tx += origin_x;
        ty += origin_y;

        // Apply translation
        tx += self.translate.0;
        ty += self.translate.1;

        (tx, ty)
    }
}

impl Animatable for Transform {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            translate: (
                from.translate.0 + (to.translate.0 - from.translate.0) * t,
                from.translate.1 + (to.translate.1 - from.translate.1) * t,
            ),
            scale: (
                from.scale.0 + (to.scale.0 - from.scale.0) * t,
                from.scale.1 + (to.scale.1 - from.scale.1) * t,
            ),
            rotate: from.rotate + (to.rotate - from.rotate) * t,
            origin: from.origin, // Origin doesn't animate
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
