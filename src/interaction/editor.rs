use crate::core::drawing::{Drawing, DrawingKind};
use crate::core::types::{LogicalPoint, PointDelta};
use crate::interaction::handles::HandleKind;

/// Translates every anchor by `delta`. Kind-agnostic and always valid.
///
/// The input is never mutated; callers may keep the previous record in a
/// history snapshot.
#[must_use]
pub fn move_drawing(drawing: &Drawing, delta: PointDelta) -> Drawing {
    let mut moved = drawing.clone();
    for point in &mut moved.points {
        point.time += delta.time;
        point.price += delta.price;
    }
    moved
}

/// Applies a handle drag to a drawing, returning the edited record.
///
/// Kind-specific contract:
/// - LINE/FIB/CHANNEL: the indexed anchor is replaced by `target`.
/// - BOX: the dragged corner is clamped against the opposite stored corner
///   so the rectangle can never invert into negative size.
/// - HLINE: every anchor is forced to `target.price`; the drag's time is
///   ignored, since the line's defining property is one shared price.
///
/// A handle that does not belong to the drawing's kind, or an out-of-range
/// `point_index`, is a no-op returning an unchanged clone. An editor must
/// never fail mid-drag.
#[must_use]
pub fn resize_drawing_at_handle(
    drawing: &Drawing,
    handle: HandleKind,
    target: LogicalPoint,
    point_index: usize,
) -> Drawing {
    let mut edited = drawing.clone();
    if point_index >= edited.points.len() {
        return edited;
    }

    match &edited.kind {
        DrawingKind::Line | DrawingKind::Fib { .. } => match handle {
            HandleKind::LineStart | HandleKind::LineEnd => {
                edited.points[point_index] = target;
            }
            _ => {}
        },
        DrawingKind::Channel => match handle {
            HandleKind::ChannelA | HandleKind::ChannelB | HandleKind::ChannelC => {
                edited.points[point_index] = target;
            }
            _ => {}
        },
        DrawingKind::HorizontalLine => match handle {
            HandleKind::LineStart | HandleKind::LineEnd => {
                for point in &mut edited.points {
                    point.price = target.price;
                }
            }
            _ => {}
        },
        DrawingKind::Box => {
            if point_index > 1 {
                return edited;
            }
            let Some(&other) = edited.points.get(1 - point_index) else {
                return edited;
            };
            let clamped = match handle {
                HandleKind::BoxTopLeft => LogicalPoint::new(
                    target.time.min(other.time),
                    target.price.max(other.price),
                ),
                HandleKind::BoxTopRight => LogicalPoint::new(
                    target.time.max(other.time),
                    target.price.max(other.price),
                ),
                HandleKind::BoxBottomLeft => LogicalPoint::new(
                    target.time.min(other.time),
                    target.price.min(other.price),
                ),
                HandleKind::BoxBottomRight => LogicalPoint::new(
                    target.time.max(other.time),
                    target.price.min(other.price),
                ),
                _ => return edited,
            };
            edited.points[point_index] = clamped;
        }
    }

    edited
}
