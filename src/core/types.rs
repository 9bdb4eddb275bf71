use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::numeric::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

/// Pixel insets reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CanvasBounds {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl CanvasBounds {
    #[must_use]
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Horizontal pixel length left for plotting after insets.
    #[must_use]
    pub fn inner_width(self, display_width: f64) -> f64 {
        display_width - self.left - self.right
    }

    /// Vertical pixel length left for plotting after insets.
    #[must_use]
    pub fn inner_height(self, display_height: f64) -> f64 {
        display_height - self.top - self.bottom
    }
}

/// One XY sample of a time-series source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            x: datetime_to_unix_seconds(time),
            y: decimal_to_f64(value, "value")?,
        })
    }
}
