//! annot-rs: chart annotation geometry and deterministic OHLC replay.
//!
//! This crate is the pure-compute core of an interactive charting stack:
//! drawing records and their pixel-space projection, hit testing and handle
//! derivation under DPR-aware tolerances, invariant-preserving move/resize
//! edits, a bounded undo/redo history, and a timer-driven replay engine over
//! candle series. It renders nothing, fetches nothing, and persists nothing;
//! those concerns belong to the embedding host.

pub mod core;
pub mod error;
pub mod history;
pub mod interaction;
pub mod replay;
pub mod telemetry;

pub use crate::core::{Drawing, DrawingCollection, DrawingKind, LogicalPoint, OhlcBar, PixelPoint};
pub use crate::error::{AnnotError, AnnotResult};
pub use crate::history::History;
pub use crate::replay::{ReplayConfig, ReplayEngine, ReplayStatus};
