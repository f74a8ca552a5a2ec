//! Mapping smoothed offsets onto card rotations and layer translations.
//!
//! Angles follow CSS conventions: x to the right, y down, z toward the
//! viewer. A positive `rotateX` sends the top edge away from the viewer and a
//! positive `rotateY` sends the right edge away, so the part of the card
//! under the pointer dips back.

use crate::constants::{INLINE_DEPTH_LAYERS, OFFSET_HALF_RANGE};
use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

/// Card rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltTransform {
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
}

impl TiltTransform {
    pub const NEUTRAL: Self = Self {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
    };

    /// Linear map of an offset in [-0.5, 0.5] onto +-`max_deg`.
    ///
    /// Vertical offset drives `rotateX` with inverted sign; horizontal offset
    /// drives `rotateY`.
    pub fn from_offset(offset: Vec2, max_deg: f32) -> Self {
        let scale = max_deg / OFFSET_HALF_RANGE;
        Self {
            rotate_x_deg: -offset.y * scale,
            rotate_y_deg: offset.x * scale,
        }
    }

    #[inline]
    pub fn is_within(&self, epsilon_deg: f32) -> bool {
        self.rotate_x_deg.abs() <= epsilon_deg && self.rotate_y_deg.abs() <= epsilon_deg
    }

    /// Rotation matrix equivalent to `rotateX(..) rotateY(..)` in CSS space.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotate_x_deg.to_radians())
            * Mat4::from_rotation_y(self.rotate_y_deg.to_radians())
    }

    /// Position of a surface-local point (relative to the card center) after rotation.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }

    /// CSS `transform` value for the card.
    pub fn to_css(&self, perspective_px: Option<f32>) -> String {
        let rotation = format!(
            "rotateX({:.3}deg) rotateY({:.3}deg)",
            tidy(self.rotate_x_deg, 3),
            tidy(self.rotate_y_deg, 3)
        );
        match perspective_px {
            Some(p) => format!("perspective({:.0}px) {}", p, rotation),
            None => rotation,
        }
    }
}

/// A child element lifted off the card along z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthLayer {
    pub translate_z_px: f32,
}

impl DepthLayer {
    pub fn new(translate_z_px: f32) -> Self {
        Self { translate_z_px }
    }

    /// Layer translation for the current offset. `shift_gain` adds a lateral
    /// drift proportional to depth; zero keeps a pure z lift.
    pub fn transform(&self, offset: Vec2, shift_gain: f32) -> LayerTransform {
        let shift = offset * self.translate_z_px * shift_gain;
        LayerTransform {
            shift_x_px: shift.x,
            shift_y_px: shift.y,
            translate_z_px: self.translate_z_px,
        }
    }
}

pub type DepthLayers = SmallVec<[DepthLayer; INLINE_DEPTH_LAYERS]>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerTransform {
    pub shift_x_px: f32,
    pub shift_y_px: f32,
    pub translate_z_px: f32,
}

impl LayerTransform {
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, {:.2}px)",
            tidy(self.shift_x_px, 2),
            tidy(self.shift_y_px, 2),
            tidy(self.translate_z_px, 2)
        )
    }
}

// Round to the printed precision so tiny negatives don't render as "-0.000".
#[inline]
fn tidy(v: f32, places: i32) -> f32 {
    let f = 10f32.powi(places);
    (v * f).round() / f + 0.0
}
