use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::LogicalPoint;
use crate::error::{AnnotError, AnnotResult};

/// Default retracement ratios applied to new fibonacci drawings.
pub const DEFAULT_FIB_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Closed set of supported drawing kinds.
///
/// The editor and handle model match on this exhaustively, so adding a kind
/// is a compile-time-checked, single-point change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawingKind {
    #[serde(rename = "LINE")]
    Line,
    #[serde(rename = "HLINE")]
    HorizontalLine,
    #[serde(rename = "BOX")]
    Box,
    #[serde(rename = "FIB")]
    Fib { levels: Vec<f64> },
    #[serde(rename = "CHANNEL")]
    Channel,
}

impl DrawingKind {
    /// Fibonacci kind preloaded with [`DEFAULT_FIB_RATIOS`].
    #[must_use]
    pub fn fib_default() -> Self {
        Self::Fib {
            levels: DEFAULT_FIB_RATIOS.to_vec(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Line => "LINE",
            Self::HorizontalLine => "HLINE",
            Self::Box => "BOX",
            Self::Fib { .. } => "FIB",
            Self::Channel => "CHANNEL",
        }
    }

    /// Anchor point count every drawing of this kind must carry.
    #[must_use]
    pub fn expected_point_count(&self) -> usize {
        match self {
            Self::Line | Self::HorizontalLine | Self::Box | Self::Fib { .. } => 2,
            Self::Channel => 3,
        }
    }
}

/// Inline capacity covering the largest kind (channel, 3 anchors).
pub type AnchorPoints = SmallVec<[LogicalPoint; 3]>;

/// One chart annotation, keyed to an instrument symbol and timeframe.
///
/// Drawings are immutable records: edits go through the interaction editor,
/// which returns a new `Drawing` rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: String,
    pub symbol: String,
    pub timeframe: String,
    #[serde(flatten)]
    pub kind: DrawingKind,
    pub points: AnchorPoints,
}

impl Drawing {
    /// Builds a validated drawing.
    ///
    /// The anchor count must match the kind (2 for LINE/HLINE/BOX/FIB, 3 for
    /// CHANNEL) and every coordinate must be finite.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        kind: DrawingKind,
        points: impl IntoIterator<Item = LogicalPoint>,
    ) -> AnnotResult<Self> {
        let points: AnchorPoints = points.into_iter().collect();

        let expected = kind.expected_point_count();
        if points.len() != expected {
            return Err(AnnotError::InvalidPointCount {
                kind: kind.name(),
                expected,
                actual: points.len(),
            });
        }

        for point in &points {
            if !point.time.is_finite() || !point.price.is_finite() {
                return Err(AnnotError::InvalidData(
                    "drawing anchors must be finite".to_owned(),
                ));
            }
        }

        if let DrawingKind::Fib { levels } = &kind {
            if levels.iter().any(|ratio| !ratio.is_finite()) {
                return Err(AnnotError::InvalidData(
                    "fib ratios must be finite".to_owned(),
                ));
            }
        }

        Ok(Self {
            id: id.into(),
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            kind,
            points,
        })
    }
}

/// Insertion-ordered drawing set: iteration order is paint order, and the
/// last entry renders on top. This is the snapshot type committed into the
/// undo/redo history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingCollection {
    drawings: IndexMap<String, Drawing>,
}

impl DrawingCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Drawing> {
        self.drawings.get(id)
    }

    /// Inserts a new drawing at the top of the z-order, or replaces an
    /// existing one in place without disturbing its position.
    pub fn upsert(&mut self, drawing: Drawing) -> Option<Drawing> {
        self.drawings.insert(drawing.id.clone(), drawing)
    }

    /// Removes a drawing, shifting later entries down to keep paint order
    /// contiguous.
    pub fn remove(&mut self, id: &str) -> Option<Drawing> {
        self.drawings.shift_remove(id)
    }

    /// Drawings in paint order (bottom to top).
    pub fn iter(&self) -> impl Iterator<Item = &Drawing> {
        self.drawings.values()
    }
}

impl FromIterator<Drawing> for DrawingCollection {
    fn from_iter<I: IntoIterator<Item = Drawing>>(iter: I) -> Self {
        let mut collection = Self::new();
        for drawing in iter {
            collection.upsert(drawing);
        }
        collection
    }
}
