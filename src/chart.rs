use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::axes::{AbscissaAxisRenderer, LabelFormatterFn, OrdinatesAxisRenderer, TextMeasurer};
use crate::core::candlestick::{CandlestickSeries, OhlcBar};
use crate::core::coordinates;
use crate::core::frame::FrameScheduler;
use crate::core::options::{ChartConfig, RenderingOptions, RowState};
use crate::core::resolver;
use crate::core::source::{DataSource, SeriesSpacing};
use crate::core::time_series::TimeSeries;
use crate::core::types::DataPoint;
use crate::error::{ChartError, ChartResult};
use crate::labeling::{LabelGenerator, LabelProps};

/// Stable handle to a series owned by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

#[derive(Debug)]
enum SeriesData {
    Points(TimeSeries),
    Candles(CandlestickSeries),
}

impl SeriesData {
    fn kind(&self) -> &'static str {
        match self {
            Self::Points(_) => "points",
            Self::Candles(_) => "candles",
        }
    }
}

#[derive(Debug)]
struct Series {
    row: usize,
    data: SeriesData,
}

impl Series {
    fn source(&self) -> &dyn DataSource {
        match &self.data {
            SeriesData::Points(series) => series,
            SeriesData::Candles(series) => series,
        }
    }
}

/// Resolved output of one frame for painting collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub abscissa_range: (f64, f64),
    pub abscissa_labels: LabelProps,
    pub rows: Vec<RowFrame>,
}

/// One row's resolved vertical state within a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFrame {
    pub ordinates_range: (f64, f64),
    pub labels: LabelProps,
}

/// Chart orchestrator: owns the frame state, the series registry and the axis
/// renderers, and drives them in dependency order once per coalesced frame.
pub struct Chart {
    options: RenderingOptions,
    scheduler: FrameScheduler,
    abscissa: AbscissaAxisRenderer,
    ordinates: Vec<OrdinatesAxisRenderer>,
    series: IndexMap<SeriesId, Series>,
    next_series_id: u64,
    dragging: bool,
    last_pointer: Option<(f64, f64)>,
    pending_fit_width: bool,
    pending_fit_height: bool,
}

impl Chart {
    /// Creates a chart with one auto-height row.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;

        let mut chart = Self {
            options: RenderingOptions::from_config(config),
            scheduler: FrameScheduler::new(),
            abscissa: AbscissaAxisRenderer::new(),
            ordinates: Vec::new(),
            series: IndexMap::new(),
            next_series_id: 0,
            dragging: false,
            last_pointer: None,
            pending_fit_width: false,
            pending_fit_height: false,
        };
        chart.add_row(None);
        Ok(chart)
    }

    /// Appends a row; `height_px` of `None` lets the row fill the viewport.
    pub fn add_row(&mut self, height_px: Option<f64>) -> usize {
        self.options.rows.push(RowState::new(height_px));
        self.ordinates.push(OrdinatesAxisRenderer::new(self.ordinates.len()));
        self.scheduler.request_frame();
        self.options.rows.len() - 1
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.options.rows.len()
    }

    #[must_use]
    pub fn options(&self) -> &RenderingOptions {
        &self.options
    }

    #[must_use]
    pub fn scheduler(&self) -> FrameScheduler {
        self.scheduler.clone()
    }

    fn check_row(&self, row: usize) -> ChartResult<()> {
        if row >= self.options.rows.len() {
            return Err(ChartError::InvalidRow {
                row,
                rows: self.options.rows.len(),
            });
        }
        Ok(())
    }

    fn insert_series(&mut self, row: usize, data: SeriesData) -> SeriesId {
        let id = SeriesId(self.next_series_id);
        self.next_series_id += 1;
        self.series.insert(id, Series { row, data });
        self.scheduler.request_frame();
        id
    }

    /// Adds an XY series to a row. Fails fast on an unknown row.
    pub fn add_time_series(&mut self, row: usize) -> ChartResult<SeriesId> {
        self.check_row(row)?;
        let mut series = TimeSeries::new();
        series.attach_scheduler(self.scheduler.clone());
        Ok(self.insert_series(row, SeriesData::Points(series)))
    }

    /// Adds an OHLC candle series to a row. Fails fast on an unknown row.
    pub fn add_candlestick_series(&mut self, row: usize) -> ChartResult<SeriesId> {
        self.check_row(row)?;
        let mut series = CandlestickSeries::new();
        series.attach_scheduler(self.scheduler.clone());
        Ok(self.insert_series(row, SeriesData::Candles(series)))
    }

    fn series_mut(&mut self, id: SeriesId) -> ChartResult<&mut Series> {
        self.series
            .get_mut(&id)
            .ok_or(ChartError::UnknownSeries(id.0))
    }

    fn series_ref(&self, id: SeriesId) -> ChartResult<&Series> {
        self.series.get(&id).ok_or(ChartError::UnknownSeries(id.0))
    }

    /// Replaces an XY series' records and schedules a frame.
    pub fn set_time_series_data(&mut self, id: SeriesId, data: Vec<DataPoint>) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        match &mut series.data {
            SeriesData::Points(points) => {
                points.set_data(data);
                Ok(())
            }
            other => Err(ChartError::SeriesKindMismatch {
                id: id.0,
                requested: "points",
                actual: other.kind(),
            }),
        }
    }

    /// Replaces a candle series' records and schedules a frame.
    pub fn set_candlestick_data(&mut self, id: SeriesId, data: Vec<OhlcBar>) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        match &mut series.data {
            SeriesData::Candles(candles) => {
                candles.set_data(data);
                Ok(())
            }
            other => Err(ChartError::SeriesKindMismatch {
                id: id.0,
                requested: "candles",
                actual: other.kind(),
            }),
        }
    }

    pub fn time_series_data(&self, id: SeriesId) -> ChartResult<&[DataPoint]> {
        match &self.series_ref(id)?.data {
            SeriesData::Points(points) => Ok(points.data()),
            other => Err(ChartError::SeriesKindMismatch {
                id: id.0,
                requested: "points",
                actual: other.kind(),
            }),
        }
    }

    pub fn candlestick_data(&self, id: SeriesId) -> ChartResult<&[OhlcBar]> {
        match &self.series_ref(id)?.data {
            SeriesData::Candles(candles) => Ok(candles.data()),
            other => Err(ChartError::SeriesKindMismatch {
                id: id.0,
                requested: "candles",
                actual: other.kind(),
            }),
        }
    }

    pub fn set_series_spacing(&mut self, id: SeriesId, spacing: SeriesSpacing) -> ChartResult<()> {
        let series = self.series_mut(id)?;
        match &mut series.data {
            SeriesData::Points(points) => points.set_spacing(spacing),
            SeriesData::Candles(candles) => candles.set_spacing(spacing),
        }
        self.scheduler.request_frame();
        Ok(())
    }

    pub fn set_auto_resize_ordinates(&mut self, enabled: bool) {
        self.options.auto_resize_ordinates = enabled;
        self.scheduler.request_frame();
    }

    pub fn set_abscissa_formatter(&mut self, formatter: LabelFormatterFn) {
        self.abscissa.set_label_formatter(formatter);
        self.scheduler.request_frame();
    }

    pub fn set_abscissa_generator(&mut self, generator: Arc<dyn LabelGenerator>) {
        self.abscissa.set_label_generator(generator);
        self.scheduler.request_frame();
    }

    pub fn set_ordinates_formatter(
        &mut self,
        row: usize,
        formatter: LabelFormatterFn,
    ) -> ChartResult<()> {
        self.check_row(row)?;
        self.ordinates[row].set_label_formatter(formatter);
        self.scheduler.request_frame();
        Ok(())
    }

    pub fn set_ordinates_generator(
        &mut self,
        row: usize,
        generator: Arc<dyn LabelGenerator>,
    ) -> ChartResult<()> {
        self.check_row(row)?;
        self.ordinates[row].set_label_generator(generator);
        self.scheduler.request_frame();
        Ok(())
    }

    pub fn set_text_measurer(&mut self, measurer: Arc<dyn TextMeasurer>) {
        self.abscissa.set_text_measurer(measurer.clone());
        for renderer in &mut self.ordinates {
            renderer.set_text_measurer(measurer.clone());
        }
        self.scheduler.request_frame();
    }

    // Interaction surface. Handlers mutate the frame state and request one
    // coalesced frame; nothing resolves until the next `tick`.

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last_pointer = Some((x, y));
        self.options.cursor_position = None;
        self.options.cursor_hovered_row = None;
        self.scheduler.request_frame();
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, hovered_row: Option<usize>) {
        if self.dragging {
            if let Some((last_x, _)) = self.last_pointer {
                self.options.display_offset.0 -= x - last_x;
            }
            self.last_pointer = Some((x, y));
        } else {
            self.options.cursor_position = Some((x, y));
            self.options.cursor_hovered_row =
                hovered_row.filter(|row| *row < self.options.rows.len());
        }
        trace!(x, y, dragging = self.dragging, "pointer move");
        self.scheduler.request_frame();
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.dragging = false;
        self.last_pointer = None;
        self.options.cursor_position = Some((x, y));
        self.scheduler.request_frame();
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
        self.options.cursor_position = None;
        self.options.cursor_hovered_row = None;
        self.scheduler.request_frame();
    }

    /// Horizontal wheel scroll pans the visible window.
    pub fn wheel_scroll(&mut self, delta_x: f64) {
        self.options.display_offset.0 += delta_x;
        self.scheduler.request_frame();
    }

    /// Relative horizontal zoom (axis drag). Clearing the cached spacing makes
    /// the next resolve re-derive it from the updated ratio.
    pub fn zoom_abscissa(&mut self, zoom_delta: f64) {
        self.options.horizontal_zoom -= zoom_delta;
        self.options.horizontal_distance = None;
        self.scheduler.request_frame();
    }

    /// Relative vertical zoom for one row; inert while auto-resize is on.
    pub fn zoom_ordinates(&mut self, row: usize, zoom_delta: f64) -> ChartResult<()> {
        self.check_row(row)?;
        self.options.rows[row].zoom_ratio += zoom_delta;
        self.options.rows[row].point_distance = None;
        self.scheduler.request_frame();
        Ok(())
    }

    /// Viewport resize invalidates every cached spacing.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.options.display_size = (width, height);
        self.options.horizontal_distance = None;
        for row in &mut self.options.rows {
            row.point_distance = None;
        }
        self.scheduler.request_frame();
    }

    /// One-shot fit: the next frame spreads the full data extent over the
    /// viewport on both axes and resets the zoom ratios accordingly.
    pub fn fit_content(&mut self) {
        self.pending_fit_width = true;
        self.pending_fit_height = true;
        self.options.horizontal_distance = None;
        for row in &mut self.options.rows {
            row.point_distance = None;
        }
        self.scheduler.request_frame();
    }

    /// Data value under the cursor, `(abscissa, ordinate)`, when hovering.
    pub fn cursor_data_position(&self) -> ChartResult<Option<(f64, f64)>> {
        let (Some((x, y)), Some(row)) =
            (self.options.cursor_position, self.options.cursor_hovered_row)
        else {
            return Ok(None);
        };

        let abscissa = coordinates::pixel_to_abscissa(x, &self.options)?;
        let ordinate =
            coordinates::pixel_to_ordinate(y, row, self.options.plot_height_px(row), &self.options)?;
        Ok(Some((abscissa, ordinate)))
    }

    /// Runs at most one resolve-and-render pass if anything requested it.
    pub fn tick(&mut self) -> Option<FrameSnapshot> {
        if !self.scheduler.take_pending() {
            return None;
        }
        self.render_frame()
    }

    /// Resolves ranges and labels in dependency order: abscissa range, then
    /// abscissa labels, then per row the ordinate range and labels.
    pub fn render_frame(&mut self) -> Option<FrameSnapshot> {
        if self.options.rows.is_empty() || self.series.is_empty() {
            return None;
        }

        if self.series.values().all(|series| series.source().is_empty()) {
            return None;
        }

        let fit_width = std::mem::take(&mut self.pending_fit_width);
        let fit_height = std::mem::take(&mut self.pending_fit_height);

        {
            let sources: Vec<&dyn DataSource> =
                self.series.values().map(Series::source).collect();
            resolver::refresh_abscissa_range(&sources, &mut self.options, fit_width);
        }
        let abscissa_labels = self.abscissa.render(&self.options);

        let row_count = self.options.rows.len();
        let mut rows = Vec::with_capacity(row_count);
        for row in 0..row_count {
            {
                let row_sources: Vec<&dyn DataSource> = self
                    .series
                    .values()
                    .filter(|series| series.row == row)
                    .map(Series::source)
                    .collect();
                resolver::refresh_ordinate_range(row, &row_sources, &mut self.options, fit_height);
            }

            rows.push(RowFrame {
                ordinates_range: self.options.rows[row].ordinates_range,
                labels: self.ordinates[row].render(&self.options),
            });
        }

        debug!(
            abscissa_min = self.options.abscissa_range.0,
            abscissa_max = self.options.abscissa_range.1,
            rows = row_count,
            "frame resolved"
        );

        Some(FrameSnapshot {
            abscissa_range: self.options.abscissa_range,
            abscissa_labels,
            rows,
        })
    }
}
