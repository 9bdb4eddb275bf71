use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use rowchart::core::{CandlestickSeries, DataPoint, DataSource, OhlcBar, TimeSeries};

fn sample_points() -> TimeSeries {
    let mut series = TimeSeries::new();
    series.set_data(vec![
        DataPoint::new(0.0, 5.0),
        DataPoint::new(2.5, 50.0),
        DataPoint::new(10.0, 20.0),
    ]);
    series
}

fn sample_candles() -> CandlestickSeries {
    let mut series = CandlestickSeries::new();
    series.set_data(vec![
        OhlcBar::new(0.0, 10.0, 14.0, 8.0, 12.0).expect("bar"),
        OhlcBar::new(5.0, 12.0, 30.0, 11.0, 28.0).expect("bar"),
        OhlcBar::new(10.0, 28.0, 29.0, 20.0, 21.0).expect("bar"),
    ]);
    series
}

#[test]
fn empty_series_answer_none_for_every_extent() {
    let series = TimeSeries::new();

    assert_eq!(series.extent_min_x(None), None);
    assert_eq!(series.extent_max_x(None), None);
    assert_eq!(series.extent_min_y(None), None);
    assert_eq!(series.extent_max_y(None), None);
    assert_eq!(series.min_adjacent_gap_x(), None);
    assert_eq!(series.max_precision_x(), 0);
}

#[test]
fn time_series_extents_cover_the_full_data() {
    let series = sample_points();

    assert_eq!(series.extent_min_x(None), Some(0.0));
    assert_eq!(series.extent_max_x(None), Some(10.0));
    assert_eq!(series.extent_min_y(None), Some(5.0));
    assert_eq!(series.extent_max_y(None), Some(50.0));
}

#[test]
fn time_series_extents_honor_the_cross_filter() {
    let series = sample_points();

    assert_eq!(series.extent_max_y(Some((0.0, 3.0))), Some(50.0));
    assert_eq!(series.extent_max_y(Some((5.0, 20.0))), Some(20.0));
    assert_eq!(series.extent_min_y(Some((100.0, 200.0))), None);
}

#[test]
fn time_series_min_gap_and_precision() {
    let series = sample_points();

    assert_eq!(series.min_adjacent_gap_x(), Some(2.5));
    assert_eq!(series.max_precision_x(), 1);
    assert_eq!(series.max_precision_y(None), 0);
}

#[test]
fn single_point_series_has_no_adjacent_gap() {
    let mut series = TimeSeries::new();
    series.set_data(vec![DataPoint::new(1.0, 1.0)]);

    assert_eq!(series.min_adjacent_gap_x(), None);
    assert_eq!(series.extent_min_x(None), Some(1.0));
}

#[test]
fn candle_vertical_extents_span_low_to_high() {
    let series = sample_candles();

    assert_eq!(series.extent_min_y(None), Some(8.0));
    assert_eq!(series.extent_max_y(None), Some(30.0));
    assert_eq!(series.extent_min_y(Some((4.0, 11.0))), Some(11.0));
}

#[test]
fn candle_horizontal_filter_requires_the_whole_body_inside() {
    let series = sample_candles();

    // Only the first bar fits entirely inside [7, 15].
    assert_eq!(series.extent_min_x(Some((7.0, 15.0))), Some(0.0));
    assert_eq!(series.extent_max_x(Some((7.0, 15.0))), Some(0.0));
    assert_eq!(series.extent_min_x(Some((0.0, 9.0))), None);
}

#[test]
fn ohlc_validation_rejects_inconsistent_bars() {
    assert!(OhlcBar::new(0.0, 1.0, 2.0, 3.0, 1.5).is_err(), "low > high");
    assert!(OhlcBar::new(0.0, 5.0, 2.0, 1.0, 1.5).is_err(), "open outside");
    assert!(OhlcBar::new(0.0, 1.5, 2.0, 1.0, f64::NAN).is_err(), "nan close");
    assert!(OhlcBar::new(0.0, 1.5, 2.0, 1.0, 1.2).is_ok());
}

#[test]
fn decimal_time_constructors_convert_exactly() {
    let time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("time");

    let point = DataPoint::from_decimal_time(time, Decimal::new(12345, 2)).expect("point");
    assert_eq!(point.y, 123.45);
    assert_eq!(point.x, time.timestamp() as f64);

    let bar = OhlcBar::from_decimal_time(
        time,
        Decimal::new(100, 0),
        Decimal::new(110, 0),
        Decimal::new(95, 0),
        Decimal::new(105, 0),
    )
    .expect("bar");
    assert_eq!(bar.high, 110.0);
    assert!(bar.is_bullish());
}
