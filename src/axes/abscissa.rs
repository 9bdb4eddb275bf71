use std::sync::Arc;

use tracing::trace;

use crate::axes::{CharAdvanceMeasurer, LabelFormatterFn, TextMeasurer, default_formatter, label_budget};
use crate::core::numeric::round_to_significant;
use crate::core::options::RenderingOptions;
use crate::labeling::{ExtendedWilkinson, LabelGenerator, LabelInclusion, LabelProps};

/// Coarse budget used for the trial pass that measures label text width.
const TRIAL_LABEL_BUDGET: usize = 20;
/// Minimum horizontal gap between neighbouring labels, in CSS pixels.
const MIN_TEXT_SPACING_PX: f64 = 20.0;
/// Digits kept when re-snapping labels extended onto the cached lattice.
const LABEL_PRECISION_DIGITS: usize = 10;

/// Horizontal axis renderer: budgets, caches and emits abscissa tick labels.
pub struct AbscissaAxisRenderer {
    generator: Arc<dyn LabelGenerator>,
    formatter: LabelFormatterFn,
    measurer: Arc<dyn TextMeasurer>,
    cache: Option<AbscissaCache>,
}

#[derive(Debug, Clone)]
struct AbscissaCache {
    display_size: (f64, f64),
    pixel_ratio: f64,
    range: (f64, f64),
    horizontal_distance: Option<f64>,
    props: LabelProps,
}

/// True when a cached result can no longer be served as-is.
fn is_dirty(cache: &AbscissaCache, options: &RenderingOptions) -> bool {
    cache.display_size != options.display_size
        || cache.pixel_ratio != options.pixel_ratio
        || cache.range != options.abscissa_range
}

/// True when only the visible window shifted: same spacing, same width,
/// different position. Panning never changes the tick step, so the cached
/// lattice stays valid.
fn is_pure_pan(cache: &AbscissaCache, options: &RenderingOptions) -> bool {
    let cached_width = cache.range.1 - cache.range.0;
    let width = options.abscissa_range.1 - options.abscissa_range.0;

    cache.display_size == options.display_size
        && cache.pixel_ratio == options.pixel_ratio
        && cache.horizontal_distance == options.horizontal_distance
        && cache.horizontal_distance.is_some()
        && cache.range != options.abscissa_range
        && (width - cached_width).abs() <= cached_width.abs() * 1e-9
}

impl AbscissaAxisRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generator: Arc::new(ExtendedWilkinson),
            formatter: default_formatter(),
            measurer: Arc::new(CharAdvanceMeasurer::default()),
            cache: None,
        }
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

    /// Resolves the tick labels for the current frame state.
    pub fn render(&mut self, options: &RenderingOptions) -> LabelProps {
        let mut slid = None;
        if let Some(cache) = &self.cache {
            if !is_dirty(cache, options) {
                return cache.props.clone();
            }

            if is_pure_pan(cache, options) && cache.props.step > 0.0 {
                slid = slide_onto_lattice(&cache.props, options.abscissa_range);
            }
        }

        if let Some(props) = slid {
            trace!(
                labels = props.labels.len(),
                step = props.step,
                "abscissa labels slid on cached lattice"
            );
            return self.store(options, props);
        }

        let (min, max) = options.abscissa_range;

        let trial = self
            .generator
            .generate(min, max, TRIAL_LABEL_BUDGET, LabelInclusion::default());
        let widest = trial
            .labels
            .iter()
            .map(|value| self.measurer.text_width(&(self.formatter)(*value)))
            .fold(0.0, f64::max);

        let axis_px = options.display_size.0 * options.pixel_ratio;
        let min_spacing = MIN_TEXT_SPACING_PX * options.pixel_ratio;
        let budget = label_budget(axis_px, widest, min_spacing);

        let props = self
            .generator
            .generate(min, max, budget, LabelInclusion::default());
        trace!(labels = props.labels.len(), budget, "abscissa labels generated");
        self.store(options, props)
    }

    fn store(&mut self, options: &RenderingOptions, props: LabelProps) -> LabelProps {
        self.cache = Some(AbscissaCache {
            display_size: options.display_size,
            pixel_ratio: options.pixel_ratio,
            range: options.abscissa_range,
            horizontal_distance: options.horizontal_distance,
            props: props.clone(),
        });
        props
    }
}

impl Default for AbscissaAxisRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-materializes the cached arithmetic sequence over a shifted window by
/// adding/removing step-spaced entries at the edges, keeping every entry on
/// the original lattice via the same fixed-precision snap.
fn slide_onto_lattice(cached: &LabelProps, range: (f64, f64)) -> Option<LabelProps> {
    let step = cached.step;
    let offset = ((range.0 - cached.min) / step).ceil();
    if !offset.is_finite() {
        return None;
    }

    let first = round_to_significant(cached.min + offset * step, LABEL_PRECISION_DIGITS);

    let mut labels = Vec::new();
    let mut value = first;
    while value <= range.1 {
        labels.push(value);
        let next = round_to_significant(value + step, LABEL_PRECISION_DIGITS);
        if next <= value {
            break;
        }
        value = next;
    }

    let (&first, &last) = (labels.first()?, labels.last()?);
    Some(LabelProps {
        labels,
        step,
        min: first,
        max: last,
    })
}
