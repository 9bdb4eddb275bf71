use serde::{Deserialize, Serialize};

use crate::core::types::CanvasBounds;
use crate::error::{ChartError, ChartResult};

/// Per-row frame state: visible ordinate range, vertical zoom and spacing.
///
/// One record per row replaces the historical lockstep arrays (range, zoom,
/// distance and height each growing separately on row creation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowState {
    pub ordinates_range: (f64, f64),
    pub zoom_ratio: f64,
    /// Cached vertical pixels per data unit; `None` re-derives from defaults.
    pub point_distance: Option<f64>,
    /// Row height hint; `None` means the row fills the viewport height.
    pub height_px: Option<f64>,
}

impl RowState {
    #[must_use]
    pub fn new(height_px: Option<f64>) -> Self {
        Self {
            ordinates_range: (0.0, 0.0),
            zoom_ratio: 1.0,
            point_distance: None,
            height_px,
        }
    }
}

/// Serializable chart bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_canvas_bounds")]
    pub canvas_bounds: CanvasBounds,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
    #[serde(default = "default_auto_resize")]
    pub auto_resize_ordinates: bool,
    pub display_size: (f64, f64),
}

fn default_canvas_bounds() -> CanvasBounds {
    CanvasBounds::new(12.0, 12.0, 0.0, 0.0)
}

fn default_pixel_ratio() -> f64 {
    1.0
}

fn default_auto_resize() -> bool {
    true
}

impl ChartConfig {
    #[must_use]
    pub fn new(display_width: f64, display_height: f64) -> Self {
        Self {
            canvas_bounds: default_canvas_bounds(),
            pixel_ratio: default_pixel_ratio(),
            auto_resize_ordinates: default_auto_resize(),
            display_size: (display_width, display_height),
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    #[must_use]
    pub fn with_canvas_bounds(mut self, bounds: CanvasBounds) -> Self {
        self.canvas_bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_auto_resize_ordinates(mut self, enabled: bool) -> Self {
        self.auto_resize_ordinates = enabled;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "pixel ratio must be finite and > 0".to_owned(),
            ));
        }

        if !self.display_size.0.is_finite()
            || !self.display_size.1.is_finite()
            || self.display_size.0 < 0.0
            || self.display_size.1 < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "display size must be finite and >= 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Authoritative frame state tying data extents, zoom, pan and geometry.
///
/// Exclusively owned and mutated by the chart orchestrator; the resolver
/// writes resolved ranges/distances back, renderers read it and keep their
/// caches privately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingOptions {
    pub canvas_bounds: CanvasBounds,
    pub pixel_ratio: f64,
    pub auto_resize_ordinates: bool,

    /// Currently visible horizontal data interval.
    pub abscissa_range: (f64, f64),
    /// Horizontal zoom ratio over each source's default spacing.
    pub horizontal_zoom: f64,
    /// Cached horizontal pixels per data unit; `None` re-derives on resolve.
    pub horizontal_distance: Option<f64>,

    /// Pan accumulator in pixels; only the horizontal component drives panning.
    pub display_offset: (f64, f64),
    /// Viewport size in CSS pixels.
    pub display_size: (f64, f64),

    pub cursor_position: Option<(f64, f64)>,
    pub cursor_hovered_row: Option<usize>,

    pub rows: Vec<RowState>,
}

impl RenderingOptions {
    #[must_use]
    pub fn from_config(config: ChartConfig) -> Self {
        Self {
            canvas_bounds: config.canvas_bounds,
            pixel_ratio: config.pixel_ratio,
            auto_resize_ordinates: config.auto_resize_ordinates,
            abscissa_range: (0.0, 0.0),
            horizontal_zoom: 1.0,
            horizontal_distance: None,
            display_offset: (0.0, 0.0),
            display_size: config.display_size,
            cursor_position: None,
            cursor_hovered_row: None,
            rows: Vec::new(),
        }
    }

    /// Pixel height a row occupies, falling back to the full viewport height.
    #[must_use]
    pub fn row_height_px(&self, row: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|state| state.height_px)
            .unwrap_or(self.display_size.1)
    }

    /// Horizontal pixel length available for plotting.
    #[must_use]
    pub fn plot_width_px(&self) -> f64 {
        self.canvas_bounds.inner_width(self.display_size.0)
    }

    /// Vertical pixel length available for plotting inside a row.
    #[must_use]
    pub fn plot_height_px(&self, row: usize) -> f64 {
        self.canvas_bounds.inner_height(self.row_height_px(row))
    }
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self::from_config(ChartConfig::new(0.0, 0.0))
    }
}
