//! Pure data-space <-> pixel-space mapping, parameterized by the current
//! frame state. Forward mappings take a precomputed pixels-per-unit scale so
//! painters can hoist the division out of per-record loops; inverse mappings
//! recompute it and guard the degenerate zero-width range.

use crate::core::options::RenderingOptions;
use crate::error::{ChartError, ChartResult};

/// Maps an abscissa value to a pixel X position.
#[must_use]
pub fn data_x_to_pixel(value: f64, px_per_unit: f64, options: &RenderingOptions) -> f64 {
    options.canvas_bounds.left + (value - options.abscissa_range.0) * px_per_unit
}

/// Maps an ordinate value to a pixel Y position inside a row.
///
/// `plot_height_px` is the row's inner height after canvas bounds; Y grows
/// downward, so larger values land closer to the row top.
#[must_use]
pub fn data_y_to_pixel(
    row: usize,
    plot_height_px: f64,
    value: f64,
    px_per_unit: f64,
    options: &RenderingOptions,
) -> f64 {
    let range_min = options
        .rows
        .get(row)
        .map(|state| state.ordinates_range.0)
        .unwrap_or(0.0);

    plot_height_px + options.canvas_bounds.top - (value - range_min) * px_per_unit
}

/// Horizontal pixels per data unit for the current abscissa range.
pub fn abscissa_px_per_unit(options: &RenderingOptions) -> ChartResult<f64> {
    let (min, max) = options.abscissa_range;
    px_per_unit(options.plot_width_px(), min, max)
}

/// Vertical pixels per data unit for a row's current ordinate range.
pub fn ordinate_px_per_unit(row: usize, options: &RenderingOptions) -> ChartResult<f64> {
    let state = options.rows.get(row).ok_or(ChartError::InvalidRow {
        row,
        rows: options.rows.len(),
    })?;

    let (min, max) = state.ordinates_range;
    px_per_unit(options.plot_height_px(row), min, max)
}

/// Recovers the abscissa value under a pixel X position (cursor readout).
pub fn pixel_to_abscissa(pos: f64, options: &RenderingOptions) -> ChartResult<f64> {
    let scale = abscissa_px_per_unit(options)?;
    Ok((pos - options.canvas_bounds.left) / scale + options.abscissa_range.0)
}

/// Recovers the ordinate value under a pixel Y position inside a row.
pub fn pixel_to_ordinate(
    pos: f64,
    row: usize,
    plot_height_px: f64,
    options: &RenderingOptions,
) -> ChartResult<f64> {
    let scale = ordinate_px_per_unit(row, options)?;
    let range_min = options.rows[row].ordinates_range.0;
    Ok(range_min + (plot_height_px + options.canvas_bounds.top - pos) / scale)
}

fn px_per_unit(length_px: f64, range_min: f64, range_max: f64) -> ChartResult<f64> {
    let width = range_max - range_min;
    if !width.is_finite() || width == 0.0 {
        return Err(ChartError::InvalidData(format!(
            "cannot map through degenerate range [{range_min}, {range_max}]"
        )));
    }

    Ok(length_px / width)
}
