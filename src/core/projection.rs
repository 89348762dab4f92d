use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::drawing::Drawing;
use crate::core::types::PixelPoint;
use crate::error::{AnnotError, AnnotResult};

/// Forward coordinate projection supplied by the charting collaborator.
///
/// `None` means the input is unmappable for the current viewport (outside
/// the visible range); the corresponding anchor is dropped from the
/// projected shape.
pub trait ChartProjection {
    fn time_to_x(&self, time: f64) -> Option<f64>;
    fn price_to_y(&self, price: f64) -> Option<f64>;
}

/// A drawing paired with its current pixel-space projection.
///
/// This is the unit hit testing and handle derivation operate on. `pixels`
/// holds only the anchors that survived projection, in anchor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingShape {
    pub drawing: Drawing,
    pub pixels: SmallVec<[PixelPoint; 3]>,
}

/// Projects a drawing's anchors through the host projection, dropping any
/// anchor the projection cannot map.
#[must_use]
pub fn project_drawing(drawing: &Drawing, projection: &impl ChartProjection) -> DrawingShape {
    let pixels = drawing
        .points
        .iter()
        .filter_map(|point| {
            let x = projection.time_to_x(point.time)?;
            let y = projection.price_to_y(point.price)?;
            Some(PixelPoint::new(x, y))
        })
        .collect();

    DrawingShape {
        drawing: drawing.clone(),
        pixels,
    }
}

/// Projects every drawing in `drawings`, preserving paint order.
#[must_use]
pub fn project_drawings<'a, I>(drawings: I, projection: &impl ChartProjection) -> Vec<DrawingShape>
where
    I: IntoIterator<Item = &'a Drawing>,
{
    drawings
        .into_iter()
        .map(|drawing| project_drawing(drawing, projection))
        .collect()
}

/// Linear time/price projection over a fixed viewport.
///
/// The price axis is inverted: higher prices map to smaller `y`, matching
/// screen coordinates. Values outside the visible ranges are unmappable.
/// Intended for tests and headless hosts; real chart backends supply their
/// own [`ChartProjection`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearProjection {
    time_start: f64,
    time_end: f64,
    price_min: f64,
    price_max: f64,
    width: f64,
    height: f64,
}

impl LinearProjection {
    pub fn new(
        time_start: f64,
        time_end: f64,
        price_min: f64,
        price_max: f64,
        width: f64,
        height: f64,
    ) -> AnnotResult<Self> {
        if !time_start.is_finite()
            || !time_end.is_finite()
            || !price_min.is_finite()
            || !price_max.is_finite()
            || time_start >= time_end
            || price_min >= price_max
        {
            return Err(AnnotError::InvalidData(
                "projection ranges must be finite and non-empty".to_owned(),
            ));
        }

        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(AnnotError::InvalidData(
                "projection viewport must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            time_start,
            time_end,
            price_min,
            price_max,
            width,
            height,
        })
    }
}

impl ChartProjection for LinearProjection {
    fn time_to_x(&self, time: f64) -> Option<f64> {
        if !time.is_finite() || time < self.time_start || time > self.time_end {
            return None;
        }
        let normalized = (time - self.time_start) / (self.time_end - self.time_start);
        Some(normalized * self.width)
    }

    fn price_to_y(&self, price: f64) -> Option<f64> {
        if !price.is_finite() || price < self.price_min || price > self.price_max {
            return None;
        }
        let normalized = (price - self.price_min) / (self.price_max - self.price_min);
        Some((1.0 - normalized) * self.height)
    }
}
