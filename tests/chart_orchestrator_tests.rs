use approx::assert_relative_eq;
use rowchart::chart::Chart;
use rowchart::core::{ChartConfig, DataPoint, OhlcBar};
use rowchart::error::ChartError;

fn chart_500x300() -> Chart {
    Chart::new(ChartConfig::new(500.0, 300.0)).expect("chart init")
}

fn populated_chart() -> Chart {
    let mut chart = chart_500x300();
    let series = chart.add_time_series(0).expect("series");
    chart
        .set_time_series_data(
            series,
            vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 100.0)],
        )
        .expect("set data");
    chart
}

#[test]
fn invalid_row_fails_fast() {
    let mut chart = chart_500x300();

    let result = chart.add_time_series(5);
    assert!(matches!(
        result,
        Err(ChartError::InvalidRow { row: 5, rows: 1 })
    ));
}

#[test]
fn series_kind_mismatch_is_a_caller_error() {
    let mut chart = chart_500x300();
    let series = chart.add_time_series(0).expect("series");

    let result = chart.set_candlestick_data(
        series,
        vec![OhlcBar::new(0.0, 1.0, 2.0, 0.5, 1.5).expect("bar")],
    );
    assert!(matches!(result, Err(ChartError::SeriesKindMismatch { .. })));
}

#[test]
fn unknown_series_is_rejected() {
    let foreign = {
        let mut other = chart_500x300();
        let _ = other.add_time_series(0).expect("first");
        other.add_time_series(0).expect("second")
    };

    let mut chart = chart_500x300();
    let _ = chart.add_time_series(0).expect("series");

    let result = chart.time_series_data(foreign);
    assert!(matches!(result, Err(ChartError::UnknownSeries(_))));
}

#[test]
fn rapid_events_coalesce_into_one_frame() {
    let mut chart = populated_chart();

    chart.wheel_scroll(4.0);
    chart.wheel_scroll(4.0);
    chart.pointer_move(100.0, 50.0, Some(0));

    assert!(chart.tick().is_some());
    assert!(chart.tick().is_none(), "second tick must be a no-op");
}

#[test]
fn frame_resolves_ranges_and_labels_in_order() {
    let mut chart = populated_chart();

    let frame = chart.tick().expect("frame");

    assert_relative_eq!(frame.abscissa_range.0, -40.0);
    assert_relative_eq!(frame.abscissa_range.1, 10.0);
    assert!(frame.abscissa_labels.labels.len() > 1);

    assert_eq!(frame.rows.len(), 1);
    // Auto-resize is on by default: the row tightly bounds visible data.
    assert_eq!(frame.rows[0].ordinates_range, (0.0, 100.0));
    assert!(frame.rows[0].labels.labels.len() > 1);
}

#[test]
fn auto_fit_keeps_every_visible_record_inside_the_row_range() {
    let mut chart = populated_chart();

    let frame = chart.tick().expect("frame");
    let (row_min, row_max) = frame.rows[0].ordinates_range;

    for point in [DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 100.0)] {
        assert!(point.y >= row_min && point.y <= row_max);
    }
    // Tight fit: both boundaries are touched by data.
    assert_eq!(row_min, 0.0);
    assert_eq!(row_max, 100.0);
}

#[test]
fn empty_chart_produces_no_frame() {
    let mut chart = chart_500x300();
    assert!(chart.tick().is_none());

    let _ = chart.add_time_series(0).expect("series");
    assert!(chart.tick().is_none(), "series without data renders nothing");
}

#[test]
fn wheel_scroll_pans_the_resolved_window() {
    let mut chart = populated_chart();
    let before = chart.tick().expect("frame");

    chart.wheel_scroll(50.0);
    let after = chart.tick().expect("frame");

    assert_relative_eq!(after.abscissa_range.1, before.abscissa_range.1 + 5.0);
    assert_relative_eq!(
        after.abscissa_range.1 - after.abscissa_range.0,
        before.abscissa_range.1 - before.abscissa_range.0
    );
}

#[test]
fn abscissa_zoom_recomputes_spacing_on_the_next_frame() {
    let mut chart = populated_chart();
    let before = chart.tick().expect("frame");

    // Negative delta zooms in (ratio grows), narrowing the window.
    chart.zoom_abscissa(-1.0);
    let after = chart.tick().expect("frame");

    let before_width = before.abscissa_range.1 - before.abscissa_range.0;
    let after_width = after.abscissa_range.1 - after.abscissa_range.0;
    assert!(after_width < before_width);
}

#[test]
fn fit_content_spreads_the_data_extent_over_the_viewport() {
    let mut chart = populated_chart();
    let _ = chart.tick();

    chart.fit_content();
    let frame = chart.tick().expect("frame");

    assert_relative_eq!(frame.abscissa_range.0, 0.0);
    assert_relative_eq!(frame.abscissa_range.1, 10.0);
}

#[test]
fn rows_resolve_independently() {
    let mut chart = chart_500x300();
    let lower = chart.add_row(Some(120.0));

    let top_series = chart.add_time_series(0).expect("series");
    chart
        .set_time_series_data(
            top_series,
            vec![DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 100.0)],
        )
        .expect("set data");

    let volume = chart.add_time_series(lower).expect("series");
    chart
        .set_time_series_data(
            volume,
            vec![DataPoint::new(0.0, 1000.0), DataPoint::new(10.0, 4000.0)],
        )
        .expect("set data");

    let frame = chart.tick().expect("frame");

    assert_eq!(frame.rows.len(), 2);
    assert_eq!(frame.rows[0].ordinates_range, (0.0, 100.0));
    assert_eq!(frame.rows[1].ordinates_range, (1000.0, 4000.0));
}

#[test]
fn empty_row_keeps_its_previous_range() {
    let mut chart = populated_chart();
    let empty_row = chart.add_row(None);

    let frame = chart.tick().expect("frame");

    assert_eq!(frame.rows.len(), 2);
    let (min, max) = frame.rows[empty_row].ordinates_range;
    assert!(min.is_finite() && max.is_finite());
    assert_eq!((min, max), (0.0, 0.0), "untouched row state is preserved");
}

#[test]
fn cursor_readout_round_trips_through_the_mapping() {
    let mut chart = populated_chart();
    let _ = chart.tick();

    chart.pointer_move(250.0, 150.0, Some(0));
    let _ = chart.tick();

    let (abscissa, ordinate) = chart
        .cursor_data_position()
        .expect("mapping")
        .expect("hovering");

    let options = chart.options();
    assert!(abscissa > options.abscissa_range.0 && abscissa < options.abscissa_range.1);
    let (row_min, row_max) = options.rows[0].ordinates_range;
    assert!(ordinate > row_min && ordinate < row_max);
}

#[test]
fn dragging_pans_instead_of_hovering() {
    let mut chart = populated_chart();
    let _ = chart.tick();
    let before = chart.options().abscissa_range;

    chart.pointer_down(200.0, 100.0);
    chart.pointer_move(150.0, 100.0, Some(0));
    chart.pointer_up(150.0, 100.0);
    let after = chart.tick().expect("frame");

    // Dragging left by 50 px at 10 px/unit shifts the window right by 5.
    assert_relative_eq!(after.abscissa_range.1, before.1 + 5.0);
}

#[test]
fn config_rejects_invalid_pixel_ratio() {
    let config = ChartConfig::new(500.0, 300.0).with_pixel_ratio(0.0);
    assert!(Chart::new(config).is_err());
}
