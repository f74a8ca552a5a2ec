//! Pointer samples and surface geometry.
//!
//! Hosts read the surface's bounding box on every event and hand it in
//! together with the event's viewport coordinates; nothing here caches
//! geometry between samples.

use glam::Vec2;

/// Cursor position in surface-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Geometry of an interactive surface in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

impl SurfaceBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// Surfaces that are hidden or not yet laid out report a zero size.
    #[inline]
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// Convert viewport coordinates into a surface-local sample.
///
/// `bounds` is `None` when the surface is not mounted or the geometry query
/// failed; the sample is skipped in that case, as it is for non-finite
/// coordinates.
pub fn sample_pointer(
    client_x: f32,
    client_y: f32,
    bounds: Option<SurfaceBounds>,
) -> Option<(PointerSample, SurfaceBounds)> {
    let bounds = bounds?;
    if !client_x.is_finite() || !client_y.is_finite() {
        return None;
    }
    if !bounds.left.is_finite() || !bounds.top.is_finite() {
        return None;
    }
    let local = Vec2::new(client_x, client_y) - bounds.origin();
    Some((PointerSample::new(local.x, local.y), bounds))
}
