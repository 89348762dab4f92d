use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::drawing::DrawingKind;
use crate::core::projection::DrawingShape;
use crate::core::types::PixelPoint;
use crate::interaction::{BOX_MOVE_MARGIN_PX, HANDLE_TOLERANCE_PX, scaled_tolerance};

/// Closed set of manipulation handle identifiers.
///
/// Wire names are the kebab-case tags persistence and UI layers exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleKind {
    #[serde(rename = "line-start")]
    LineStart,
    #[serde(rename = "line-end")]
    LineEnd,
    #[serde(rename = "box-top-left")]
    BoxTopLeft,
    #[serde(rename = "box-top-right")]
    BoxTopRight,
    #[serde(rename = "box-bottom-left")]
    BoxBottomLeft,
    #[serde(rename = "box-bottom-right")]
    BoxBottomRight,
    #[serde(rename = "channel-a")]
    ChannelA,
    #[serde(rename = "channel-b")]
    ChannelB,
    #[serde(rename = "channel-c")]
    ChannelC,
}

impl HandleKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LineStart => "line-start",
            Self::LineEnd => "line-end",
            Self::BoxTopLeft => "box-top-left",
            Self::BoxTopRight => "box-top-right",
            Self::BoxBottomLeft => "box-bottom-left",
            Self::BoxBottomRight => "box-bottom-right",
            Self::ChannelA => "channel-a",
            Self::ChannelB => "channel-b",
            Self::ChannelC => "channel-c",
        }
    }
}

/// A draggable control point on a selected drawing.
///
/// `point_index` names the stored anchor the handle edits; for box corners
/// it is the stored corner on the same time side as the derived corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingHandle {
    pub kind: HandleKind,
    pub point_index: usize,
    pub position: PixelPoint,
}

/// Handle storage sized for the largest set (box, 4 corners).
pub type HandleSet = SmallVec<[DrawingHandle; 4]>;

/// Derives the manipulation handles for a projected drawing.
///
/// - LINE/HLINE/FIB: the two endpoints.
/// - BOX: the four bounding-box corners, independent of which opposite
///   corners were originally stored.
/// - CHANNEL: the three anchors.
///
/// A shape whose projection dropped an anchor has no handles.
#[must_use]
pub fn drawing_handles(shape: &DrawingShape) -> HandleSet {
    let mut handles = HandleSet::new();
    if shape.pixels.len() < shape.drawing.kind.expected_point_count() {
        return handles;
    }

    match &shape.drawing.kind {
        DrawingKind::Line | DrawingKind::HorizontalLine | DrawingKind::Fib { .. } => {
            handles.push(DrawingHandle {
                kind: HandleKind::LineStart,
                point_index: 0,
                position: shape.pixels[0],
            });
            handles.push(DrawingHandle {
                kind: HandleKind::LineEnd,
                point_index: 1,
                position: shape.pixels[1],
            });
        }
        DrawingKind::Box => push_box_handles(&mut handles, shape.pixels[0], shape.pixels[1]),
        DrawingKind::Channel => {
            for (index, kind) in [HandleKind::ChannelA, HandleKind::ChannelB, HandleKind::ChannelC]
                .into_iter()
                .enumerate()
            {
                handles.push(DrawingHandle {
                    kind,
                    point_index: index,
                    position: shape.pixels[index],
                });
            }
        }
    }

    handles
}

/// Returns the first handle within the DPR-scaled handle tolerance.
///
/// Handle detection runs before body hit testing in the caller's gesture
/// disambiguation, so "resize" wins over "move" near a handle.
#[must_use]
pub fn find_handle_hit(
    handles: &[DrawingHandle],
    cursor: PixelPoint,
    dpr: f64,
) -> Option<&DrawingHandle> {
    let tolerance = scaled_tolerance(HANDLE_TOLERANCE_PX, dpr);
    handles
        .iter()
        .find(|handle| handle.position.distance_to(cursor) <= tolerance)
}

/// Bounding-box containment with a DPR-scaled margin.
///
/// Lets a box be grabbed anywhere inside for moving, even though selection
/// hit testing only sees its edges.
#[must_use]
pub fn is_inside_box(points: &[PixelPoint], cursor: PixelPoint, dpr: f64) -> bool {
    if points.is_empty() {
        return false;
    }

    let mut left = f64::INFINITY;
    let mut right = f64::NEG_INFINITY;
    let mut top = f64::INFINITY;
    let mut bottom = f64::NEG_INFINITY;
    for point in points {
        left = left.min(point.x);
        right = right.max(point.x);
        top = top.min(point.y);
        bottom = bottom.max(point.y);
    }

    let margin = scaled_tolerance(BOX_MOVE_MARGIN_PX, dpr);
    cursor.x >= left - margin
        && cursor.x <= right + margin
        && cursor.y >= top - margin
        && cursor.y <= bottom + margin
}

fn push_box_handles(handles: &mut HandleSet, c1: PixelPoint, c2: PixelPoint) {
    let left = c1.x.min(c2.x);
    let right = c1.x.max(c2.x);
    let top = c1.y.min(c2.y);
    let bottom = c1.y.max(c2.y);

    // Stored corner on the same x side as the derived corner; y side breaks
    // the tie when the corners are vertically aligned.
    let index_for = |x: f64, y: f64| -> usize {
        if c1.x != c2.x {
            usize::from(!((c1.x < c2.x) == (x == left)))
        } else {
            usize::from(!((c1.y < c2.y) == (y == top)))
        }
    };

    for (kind, x, y) in [
        (HandleKind::BoxTopLeft, left, top),
        (HandleKind::BoxTopRight, right, top),
        (HandleKind::BoxBottomLeft, left, bottom),
        (HandleKind::BoxBottomRight, right, bottom),
    ] {
        handles.push(DrawingHandle {
            kind,
            point_index: index_for(x, y),
            position: PixelPoint::new(x, y),
        });
    }
}

/// Returns the handle nearest to the cursor, regardless of tolerance.
///
/// Touch hosts use this after [`find_handle_hit`] misses, to offer a
/// forgiving grab on coarse pointers.
#[must_use]
pub fn nearest_handle(handles: &[DrawingHandle], cursor: PixelPoint) -> Option<&DrawingHandle> {
    use ordered_float::OrderedFloat;

    handles
        .iter()
        .min_by_key(|handle| OrderedFloat(handle.position.distance_to(cursor)))
}
