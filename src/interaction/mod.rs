pub mod editor;
pub mod handles;

pub use editor::{move_drawing, resize_drawing_at_handle};
pub use handles::{
    DrawingHandle, HandleKind, HandleSet, drawing_handles, find_handle_hit, is_inside_box,
    nearest_handle,
};
pub use hit_test::{find_hit_shape, hit_test_drawing};

/// Base hit radius around a drawing body, in logical pixels.
pub const HIT_TOLERANCE_PX: f64 = 6.0;

/// Base hit radius around a manipulation handle, in logical pixels.
///
/// Slightly wider than the body tolerance so handle grabs win the gesture
/// disambiguation the caller performs (handles first, then body).
pub const HANDLE_TOLERANCE_PX: f64 = 8.0;

/// Extra margin around a box's bounding rectangle for grab-to-move checks.
pub const BOX_MOVE_MARGIN_PX: f64 = 4.0;

/// Scales a base pixel tolerance by the device pixel ratio so tap targets
/// keep a constant physical size across screen densities.
#[must_use]
pub fn scaled_tolerance(base_px: f64, dpr: f64) -> f64 {
    base_px * dpr
}
