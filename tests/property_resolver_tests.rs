use proptest::prelude::*;
use rowchart::core::resolver::{refresh_abscissa_range, refresh_ordinate_range};
use rowchart::core::{ChartConfig, DataPoint, RenderingOptions, RowState, TimeSeries};

fn series_from(points: &[(f64, f64)]) -> TimeSeries {
    let mut series = TimeSeries::new();
    series.set_data(points.iter().map(|(x, y)| DataPoint::new(*x, *y)).collect());
    series
}

fn options_500x300() -> RenderingOptions {
    let mut options = RenderingOptions::from_config(ChartConfig::new(500.0, 300.0));
    options.rows.push(RowState::new(None));
    options
}

proptest! {
    #[test]
    fn zooming_in_monotonically_narrows_the_window(
        zoom_low in 0.2f64..4.0,
        zoom_step in 0.1f64..4.0
    ) {
        let series = series_from(&[(0.0, 0.0), (10.0, 100.0)]);

        let mut low = options_500x300();
        low.horizontal_zoom = zoom_low;
        refresh_abscissa_range(&[&series], &mut low, false);

        let mut high = options_500x300();
        high.horizontal_zoom = zoom_low + zoom_step;
        refresh_abscissa_range(&[&series], &mut high, false);

        let low_width = low.abscissa_range.1 - low.abscissa_range.0;
        let high_width = high.abscissa_range.1 - high.abscissa_range.0;
        prop_assert!(high_width < low_width);
    }

    #[test]
    fn resolved_zoom_always_matches_the_resolved_distance(
        zoom in 0.01f64..50.0
    ) {
        let series = series_from(&[(0.0, 0.0), (10.0, 100.0)]);
        let mut options = options_500x300();
        options.horizontal_zoom = zoom;

        refresh_abscissa_range(&[&series], &mut options, false);

        let distance = options.horizontal_distance.expect("resolved distance");
        let default_px = 10.0;
        prop_assert!((options.horizontal_zoom - distance / default_px).abs() <= 1e-12);
    }

    #[test]
    fn auto_fit_bounds_every_visible_record(
        ys in prop::collection::vec(-1.0e4f64..1.0e4, 2..40)
    ) {
        let points: Vec<(f64, f64)> = ys.iter().enumerate()
            .map(|(i, y)| (i as f64, *y))
            .collect();
        let series = series_from(&points);

        let mut options = options_500x300();
        options.auto_resize_ordinates = true;
        options.abscissa_range = (0.0, points.len() as f64);

        refresh_ordinate_range(0, &[&series], &mut options, false);

        let (row_min, row_max) = options.rows[0].ordinates_range;
        let visible_min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let visible_max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // Tight fit: exact bounds, no dead padding.
        prop_assert_eq!(row_min, visible_min);
        prop_assert_eq!(row_max, visible_max);
        for y in &ys {
            prop_assert!(*y >= row_min && *y <= row_max);
        }
    }
}
