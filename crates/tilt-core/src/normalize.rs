use crate::constants::OFFSET_HALF_RANGE;
use crate::pointer::{PointerSample, SurfaceBounds};
use glam::Vec2;

/// Pointer position relative to the surface center, in [-0.5, 0.5] per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedOffset {
    pub x: f32,
    pub y: f32,
}

impl NormalizedOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Build an offset, clamping each axis into range. Non-finite input maps to zero.
    pub fn clamped(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<Vec2> for NormalizedOffset {
    fn from(v: Vec2) -> Self {
        Self::clamped(v.x, v.y)
    }
}

#[inline]
fn clamp_axis(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-OFFSET_HALF_RANGE, OFFSET_HALF_RANGE)
    } else {
        0.0
    }
}

/// How raw pixels map onto the normalized range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Normalization {
    /// Fraction of the surface size: the edges land on +-0.5.
    #[default]
    Fraction,
    /// Fixed pixel distance from the center: `half_range_px` away lands on +-0.5,
    /// independent of the surface size.
    PixelRange { half_range_px: f32 },
}

/// Map a surface-local sample onto a normalized offset.
///
/// Returns `None` for unmeasured surfaces so callers leave their state as is.
pub fn normalize(
    sample: PointerSample,
    bounds: &SurfaceBounds,
    mode: Normalization,
) -> Option<NormalizedOffset> {
    if !bounds.is_measurable() {
        return None;
    }
    let raw = sample.as_vec2();
    let offset = match mode {
        Normalization::Fraction => raw / bounds.size() - Vec2::splat(OFFSET_HALF_RANGE),
        Normalization::PixelRange { half_range_px } => {
            if !(half_range_px.is_finite() && half_range_px > 0.0) {
                return None;
            }
            (raw - bounds.size() * 0.5) / (2.0 * half_range_px)
        }
    };
    if !offset.is_finite() {
        return None;
    }
    Some(NormalizedOffset::from(offset))
}
