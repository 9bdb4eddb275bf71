use ordered_float::OrderedFloat;

#[cfg(feature = "parallel-scan")]
use rayon::prelude::*;

use crate::core::frame::FrameScheduler;
use crate::core::numeric::{decimal_precision, min_adjacent_gap};
use crate::core::source::{DataSource, SeriesSpacing, within};
use crate::core::types::DataPoint;

/// XY line series plotted against the shared abscissa.
#[derive(Debug)]
pub struct TimeSeries {
    data: Vec<DataPoint>,
    spacing: SeriesSpacing,
    scheduler: Option<FrameScheduler>,
}

impl TimeSeries {
    pub const DEFAULT_SPACING: SeriesSpacing = SeriesSpacing {
        default_px: (10.0, 10.0),
        minimum_px: (1.0, 1.0),
    };

    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            spacing: Self::DEFAULT_SPACING,
            scheduler: None,
        }
    }

    /// Wires the coalescing redraw handle; called when the chart adopts the
    /// series.
    pub(crate) fn attach_scheduler(&mut self, scheduler: FrameScheduler) {
        self.scheduler = Some(scheduler);
    }

    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    /// Replaces the record array wholesale and requests a coalesced frame.
    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        self.data = data;
        if let Some(scheduler) = &self.scheduler {
            scheduler.request_frame();
        }
    }

    pub fn set_spacing(&mut self, spacing: SeriesSpacing) {
        self.spacing = spacing;
    }
}

impl DataSource for TimeSeries {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn spacing(&self) -> SeriesSpacing {
        self.spacing
    }

    fn extent_min_x(&self, ordinates_range: Option<(f64, f64)>) -> Option<f64> {
        scan(&self.data, |p| within(p.y, ordinates_range), |p| p.x, Extreme::Min)
    }

    fn extent_max_x(&self, ordinates_range: Option<(f64, f64)>) -> Option<f64> {
        scan(&self.data, |p| within(p.y, ordinates_range), |p| p.x, Extreme::Max)
    }

    fn extent_min_y(&self, abscissa_range: Option<(f64, f64)>) -> Option<f64> {
        scan(&self.data, |p| within(p.x, abscissa_range), |p| p.y, Extreme::Min)
    }

    fn extent_max_y(&self, abscissa_range: Option<(f64, f64)>) -> Option<f64> {
        scan(&self.data, |p| within(p.x, abscissa_range), |p| p.y, Extreme::Max)
    }

    fn min_adjacent_gap_x(&self) -> Option<f64> {
        min_adjacent_gap(self.data.iter().map(|p| p.x))
    }

    fn min_adjacent_gap_y(&self) -> Option<f64> {
        min_adjacent_gap(self.data.iter().map(|p| p.y))
    }

    fn max_precision_x(&self) -> u32 {
        self.data
            .iter()
            .map(|p| decimal_precision(p.x))
            .max()
            .unwrap_or(0)
    }

    fn max_precision_y(&self, abscissa_range: Option<(f64, f64)>) -> u32 {
        self.data
            .iter()
            .filter(|p| within(p.x, abscissa_range))
            .map(|p| decimal_precision(p.y))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::new()
    }
}

fn scan(
    data: &[DataPoint],
    keep: impl Fn(&DataPoint) -> bool + Send + Sync,
    project: impl Fn(&DataPoint) -> f64 + Send + Sync,
    extreme: Extreme,
) -> Option<f64> {
    #[cfg(feature = "parallel-scan")]
    {
        let values = data.par_iter().filter(|p| keep(p)).map(|p| OrderedFloat(project(p)));
        match extreme {
            Extreme::Min => values.min().map(|v| v.0),
            Extreme::Max => values.max().map(|v| v.0),
        }
    }

    #[cfg(not(feature = "parallel-scan"))]
    {
        let values = data.iter().filter(|p| keep(p)).map(|p| OrderedFloat(project(p)));
        match extreme {
            Extreme::Min => values.min().map(|v| v.0),
            Extreme::Max => values.max().map(|v| v.0),
        }
    }
}
