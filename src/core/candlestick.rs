use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-scan")]
use rayon::prelude::*;

use crate::core::frame::FrameScheduler;
use crate::core::numeric::{datetime_to_unix_seconds, decimal_precision, decimal_to_f64, min_adjacent_gap};
use crate::core::source::{DataSource, SeriesSpacing, within};
use crate::error::{ChartError, ChartResult};

/// Canonical OHLC candle record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub timestamp: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a validated OHLC bar from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(timestamp: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        if !timestamp.is_finite()
            || !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
        {
            return Err(ChartError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// OHLC candle series plotted against the shared abscissa.
#[derive(Debug)]
pub struct CandlestickSeries {
    data: Vec<OhlcBar>,
    spacing: SeriesSpacing,
    scheduler: Option<FrameScheduler>,
}

impl CandlestickSeries {
    pub const DEFAULT_SPACING: SeriesSpacing = SeriesSpacing {
        default_px: (12.0, 1.0),
        minimum_px: (2.0, 2.0),
    };

    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            spacing: Self::DEFAULT_SPACING,
            scheduler: None,
        }
    }

    pub(crate) fn attach_scheduler(&mut self, scheduler: FrameScheduler) {
        self.scheduler = Some(scheduler);
    }

    #[must_use]
    pub fn data(&self) -> &[OhlcBar] {
        &self.data
    }

    /// Replaces the record array wholesale and requests a coalesced frame.
    pub fn set_data(&mut self, data: Vec<OhlcBar>) {
        self.data = data;
        if let Some(scheduler) = &self.scheduler {
            scheduler.request_frame();
        }
    }

    pub fn set_spacing(&mut self, spacing: SeriesSpacing) {
        self.spacing = spacing;
    }

    fn ordinate_values(&self, abscissa_range: Option<(f64, f64)>) -> Vec<f64> {
        self.data
            .iter()
            .filter(|bar| within(bar.timestamp, abscissa_range))
            .flat_map(|bar| [bar.low, bar.high, bar.open, bar.close])
            .collect()
    }
}

impl DataSource for CandlestickSeries {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn spacing(&self) -> SeriesSpacing {
        self.spacing
    }

    fn extent_min_x(&self, ordinates_range: Option<(f64, f64)>) -> Option<f64> {
        extent(&self.data, ordinates_range, |bar| bar.timestamp, Extreme::Min)
    }

    fn extent_max_x(&self, ordinates_range: Option<(f64, f64)>) -> Option<f64> {
        extent(&self.data, ordinates_range, |bar| bar.timestamp, Extreme::Max)
    }

    fn extent_min_y(&self, abscissa_range: Option<(f64, f64)>) -> Option<f64> {
        let values = self
            .data
            .iter()
            .filter(|bar| within(bar.timestamp, abscissa_range))
            .map(|bar| OrderedFloat(bar.low));
        values.min().map(|v| v.0)
    }

    fn extent_max_y(&self, abscissa_range: Option<(f64, f64)>) -> Option<f64> {
        let values = self
            .data
            .iter()
            .filter(|bar| within(bar.timestamp, abscissa_range))
            .map(|bar| OrderedFloat(bar.high));
        values.max().map(|v| v.0)
    }

    fn min_adjacent_gap_x(&self) -> Option<f64> {
        min_adjacent_gap(self.data.iter().map(|bar| bar.timestamp))
    }

    fn min_adjacent_gap_y(&self) -> Option<f64> {
        let mut values = self.ordinate_values(None);
        values.sort_by(|a, b| a.total_cmp(b));
        min_adjacent_gap(values.into_iter())
    }

    fn max_precision_x(&self) -> u32 {
        self.data
            .iter()
            .map(|bar| decimal_precision(bar.timestamp))
            .max()
            .unwrap_or(0)
    }

    fn max_precision_y(&self, abscissa_range: Option<(f64, f64)>) -> u32 {
        self.ordinate_values(abscissa_range)
            .into_iter()
            .map(decimal_precision)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

impl Default for CandlestickSeries {
    fn default() -> Self {
        Self::new()
    }
}

/// A bar passes the ordinate cross-filter only when its whole body fits.
fn extent(
    data: &[OhlcBar],
    ordinates_range: Option<(f64, f64)>,
    project: impl Fn(&OhlcBar) -> f64 + Send + Sync,
    extreme: Extreme,
) -> Option<f64> {
    let keep = |bar: &&OhlcBar| match ordinates_range {
        Some((min, max)) => bar.low >= min && bar.high <= max,
        None => true,
    };

    #[cfg(feature = "parallel-scan")]
    {
        let values = data.par_iter().filter(keep).map(|bar| OrderedFloat(project(bar)));
        match extreme {
            Extreme::Min => values.min().map(|v| v.0),
            Extreme::Max => values.max().map(|v| v.0),
        }
    }

    #[cfg(not(feature = "parallel-scan"))]
    {
        let values = data.iter().filter(keep).map(|bar| OrderedFloat(project(bar)));
        match extreme {
            Extreme::Min => values.min().map(|v| v.0),
            Extreme::Max => values.max().map(|v| v.0),
        }
    }
}
