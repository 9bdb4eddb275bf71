pub mod candlestick;
pub mod coordinates;
pub mod frame;
pub mod numeric;
pub mod options;
pub mod resolver;
pub mod source;
pub mod time_series;
pub mod types;

pub use candlestick::{CandlestickSeries, OhlcBar};
pub use frame::FrameScheduler;
pub use options::{ChartConfig, RenderingOptions, RowState};
pub use source::{DataSource, SeriesSpacing};
pub use time_series::TimeSeries;
pub use types::{CanvasBounds, DataPoint};
