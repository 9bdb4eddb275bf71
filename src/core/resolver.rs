//! Per-frame range resolution: derives the visible abscissa interval and each
//! row's ordinate interval from data extents, zoom ratios, pan offset and
//! viewport geometry.
//!
//! Resolution is skipped (previous ranges preserved) whenever any involved
//! source reports an empty extent, so a frame never observes NaN ranges.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::options::RenderingOptions;
use crate::core::source::DataSource;

type ExtentVec = SmallVec<[f64; 4]>;

/// Resolves the visible horizontal window.
///
/// With `fit_to_width`, or when no horizontal spacing is cached, spacing is
/// re-derived from the sources' defaults and the current zoom ratio; the zoom
/// ratio is then back-computed from the chosen spacing so later relative zoom
/// operations compose against what is actually on screen.
pub fn refresh_abscissa_range(
    sources: &[&dyn DataSource],
    options: &mut RenderingOptions,
    fit_to_width: bool,
) {
    if sources.is_empty() {
        return;
    }

    let Some((data_min, data_max)) = combined_extent(
        sources.iter().map(|s| s.extent_min_x(None)),
        sources.iter().map(|s| s.extent_max_x(None)),
    ) else {
        trace!("abscissa resolve skipped: empty extent");
        return;
    };

    let precision = sources
        .iter()
        .map(|s| s.max_precision_x())
        .max()
        .unwrap_or(0);
    let step = min_gap(sources.iter().map(|s| s.min_adjacent_gap_x()), precision);

    let minimum_distance = sources
        .iter()
        .map(|s| s.spacing().minimum_px.0)
        .fold(0.0, f64::max);
    let default_distance = sources
        .iter()
        .map(|s| s.spacing().default_px.0)
        .fold(0.0, f64::max);

    let mut distance = options.horizontal_distance;

    if distance.is_none() || fit_to_width {
        let mut resolved = minimum_distance.max(default_distance * options.horizontal_zoom);

        let span = (data_max - data_min).max(step);
        if fit_to_width && resolved * span < options.display_size.0 {
            // Zoomed out past the data extent: spread the full span over the
            // whole viewport instead of leaving dead padding.
            resolved = options.display_size.0 / span;
        }

        if default_distance > 0.0 {
            options.horizontal_zoom = resolved / default_distance;
        }

        distance = Some(resolved);
    }

    let Some(distance) = distance else {
        return;
    };

    if distance > 0.0 {
        let max_visible = data_max + options.display_offset.0 / distance;
        let min_visible = max_visible - options.display_size.0 / distance;

        if min_visible.is_finite() && max_visible.is_finite() {
            options.abscissa_range = (min_visible, max_visible);
        }
    }

    options.horizontal_distance = Some(distance);
    trace!(
        min = options.abscissa_range.0,
        max = options.abscissa_range.1,
        distance,
        zoom = options.horizontal_zoom,
        "abscissa resolved"
    );
}

/// Resolves one row's visible vertical window over that row's sources only.
///
/// Auto-resize mode tightly bounds the data visible inside the current
/// abscissa range and pins the row zoom to 1. Fixed mode mirrors the abscissa
/// resolution but anchors zoom at the vertical center of the data rather than
/// at the pan offset.
pub fn refresh_ordinate_range(
    row: usize,
    sources: &[&dyn DataSource],
    options: &mut RenderingOptions,
    fit_to_height: bool,
) {
    if row >= options.rows.len() || sources.is_empty() {
        return;
    }

    if options.auto_resize_ordinates {
        let filter = Some(options.abscissa_range);
        let Some((visible_min, visible_max)) = combined_extent(
            sources.iter().map(|s| s.extent_min_y(filter)),
            sources.iter().map(|s| s.extent_max_y(filter)),
        ) else {
            trace!(row, "ordinate resolve skipped: nothing visible");
            return;
        };

        let state = &mut options.rows[row];
        state.zoom_ratio = 1.0;
        state.ordinates_range = (visible_min, visible_max);
        trace!(row, min = visible_min, max = visible_max, "ordinate auto-fit");
        return;
    }

    let Some((data_min, data_max)) = combined_extent(
        sources.iter().map(|s| s.extent_min_y(None)),
        sources.iter().map(|s| s.extent_max_y(None)),
    ) else {
        trace!(row, "ordinate resolve skipped: empty extent");
        return;
    };

    let precision = sources
        .iter()
        .map(|s| s.max_precision_y(None))
        .max()
        .unwrap_or(0);
    let step = min_gap(sources.iter().map(|s| s.min_adjacent_gap_y()), precision);

    let minimum_distance = sources
        .iter()
        .map(|s| s.spacing().minimum_px.1)
        .fold(0.0, f64::max);
    let default_distance = sources
        .iter()
        .map(|s| s.spacing().default_px.1)
        .fold(0.0, f64::max);

    let row_height = options.row_height_px(row);
    let zoom_ratio = options.rows[row].zoom_ratio;
    let mut distance = options.rows[row].point_distance;

    if distance.is_none() || fit_to_height {
        let mut resolved = minimum_distance.max(default_distance * zoom_ratio);

        let span = (data_max - data_min).max(step);
        if fit_to_height && resolved * span < row_height {
            resolved = row_height / span;
        }

        if default_distance > 0.0 {
            options.rows[row].zoom_ratio = resolved / default_distance;
        }

        distance = Some(resolved);
    }

    let Some(distance) = distance else {
        return;
    };

    if distance > 0.0 {
        // Vertical zoom is anchored at the data midpoint, not the pan offset.
        let midpoint = (data_min + data_max) / 2.0;
        let half_window = row_height / distance / 2.0;
        let range = (midpoint - half_window, midpoint + half_window);

        if range.0.is_finite() && range.1.is_finite() {
            options.rows[row].ordinates_range = range;
        }
    }

    options.rows[row].point_distance = Some(distance);
    debug!(
        row,
        min = options.rows[row].ordinates_range.0,
        max = options.rows[row].ordinates_range.1,
        distance,
        "ordinate resolved"
    );
}

/// Union of per-source extents; `None` when any source has no extent or the
/// union is non-finite.
fn combined_extent(
    mins: impl Iterator<Item = Option<f64>>,
    maxs: impl Iterator<Item = Option<f64>>,
) -> Option<(f64, f64)> {
    let mins: Option<ExtentVec> = mins.collect();
    let maxs: Option<ExtentVec> = maxs.collect();

    let min = mins?.into_iter().map(OrderedFloat).min()?.0;
    let max = maxs?.into_iter().map(OrderedFloat).max()?.0;

    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Smallest adjacent gap across sources, falling back to the precision-derived
/// minimum step when no source has two records.
fn min_gap(gaps: impl Iterator<Item = Option<f64>>, precision: u32) -> f64 {
    gaps.flatten()
        .map(OrderedFloat)
        .min()
        .map(|gap| gap.0)
        .filter(|gap| *gap > 0.0)
        .unwrap_or_else(|| 10f64.powi(-(precision as i32)))
}
