use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{AnnotError, AnnotResult};

/// Drawing anchor in domain units, independent of screen resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub time: f64,
    pub price: f64,
}

impl LogicalPoint {
    #[must_use]
    pub fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, price: Decimal) -> AnnotResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            price: decimal_to_f64(price, "price")?,
        })
    }
}

/// Additive drag delta in domain units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDelta {
    pub time: f64,
    pub price: f64,
}

impl PointDelta {
    #[must_use]
    pub fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }
}

/// Screen-space point in the host's pixel coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> AnnotResult<f64> {
    value.to_f64().ok_or_else(|| {
        AnnotError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}
