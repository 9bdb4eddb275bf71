use std::sync::Arc;

use tracing::trace;

use crate::axes::{CharAdvanceMeasurer, LabelFormatterFn, TextMeasurer, default_formatter, label_budget};
use crate::core::options::RenderingOptions;
use crate::labeling::{ExtendedWilkinson, LabelGenerator, LabelInclusion, LabelProps};

/// Minimum vertical gap between neighbouring labels, in CSS pixels.
const MIN_TEXT_SPACING_PX: f64 = 50.0;

/// Vertical axis renderer for one row.
///
/// The budget derives from the font line height against the row's pixel
/// height. The cursor position participates in change detection because the
/// hovered-value readout shares this axis surface.
pub struct OrdinatesAxisRenderer {
    row: usize,
    generator: Arc<dyn LabelGenerator>,
    formatter: LabelFormatterFn,
    measurer: Arc<dyn TextMeasurer>,
    cache: Option<OrdinatesCache>,
}

#[derive(Debug, Clone)]
struct OrdinatesCache {
    display_size: (f64, f64),
    pixel_ratio: f64,
    range: (f64, f64),
    cursor_position: Option<(f64, f64)>,
    props: LabelProps,
}

/// True when a cached result can no longer be served as-is.
fn is_dirty(cache: &OrdinatesCache, row: usize, options: &RenderingOptions) -> bool {
    let range = options
        .rows
        .get(row)
        .map(|state| state.ordinates_range)
        .unwrap_or((0.0, 0.0));

    cache.display_size != options.display_size
        || cache.pixel_ratio != options.pixel_ratio
        || cache.range != range
        || cache.cursor_position != options.cursor_position
}

impl OrdinatesAxisRenderer {
    #[must_use]
    pub fn new(row: usize) -> Self {
        Self {
            row,
            generator: Arc::new(ExtendedWilkinson),
            formatter: default_formatter(),
            measurer: Arc::new(CharAdvanceMeasurer::default()),
            cache: None,
        }
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn set_label_formatter(&mut self, formatter: LabelFormatterFn) {
        self.formatter = formatter;
        self.cache = None;
    }

    pub fn set_label_generator(&mut self, generator: Arc<dyn LabelGenerator>) {
        self.generator = generator;
        self.cache = None;
    }

    pub fn set_text_measurer(&mut self, measurer: Arc<dyn TextMeasurer>) {
        self.measurer = measurer;
        self.cache = None;
    }

    /// Formats one value with the renderer's formatter (cursor readouts).
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        (self.formatter)(value)
    }

    /// Resolves the tick labels for the current frame state.
    pub fn render(&mut self, options: &RenderingOptions) -> LabelProps {
        if let Some(cache) = &self.cache {
            if !is_dirty(cache, self.row, options) {
                return cache.props.clone();
            }
        }

        let (min, max) = options
            .rows
            .get(self.row)
            .map(|state| state.ordinates_range)
            .unwrap_or((0.0, 0.0));

        let axis_px = options.row_height_px(self.row) * options.pixel_ratio;
        let line_height = self.measurer.line_height() * options.pixel_ratio;
        let min_spacing = MIN_TEXT_SPACING_PX * options.pixel_ratio;
        let budget = label_budget(axis_px, line_height, min_spacing);

        let props = self
            .generator
            .generate(min, max, budget, LabelInclusion::default());
        trace!(
            row = self.row,
            labels = props.labels.len(),
            budget,
            "ordinate labels generated"
        );

        self.cache = Some(OrdinatesCache {
            display_size: options.display_size,
            pixel_ratio: options.pixel_ratio,
            range: (min, max),
            cursor_position: options.cursor_position,
            props: props.clone(),
        });
        props
    }
}
