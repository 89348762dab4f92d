pub mod candle;
pub mod drawing;
pub mod geometry;
pub mod projection;
pub mod types;

pub use candle::OhlcBar;
pub use drawing::{DEFAULT_FIB_RATIOS, AnchorPoints, Drawing, DrawingCollection, DrawingKind};
pub use geometry::{
    ChannelGeometry, FibLevel, channel_geometry, distance_to_segment, fib_level_prices,
    point_in_polygon,
};
pub use projection::{
    ChartProjection, DrawingShape, LinearProjection, project_drawing, project_drawings,
};
pub use types::{LogicalPoint, PixelPoint, PointDelta};
