//! rowchart: interactive charting core.
//!
//! Plots XY and OHLC series against a shared horizontal axis with
//! independently scaled vertical rows. The crate resolves visible ranges from
//! data extents, zoom and pan state, and picks human-readable tick labels via
//! an extended Wilkinson search; painting backends consume the resolved
//! frames.

pub mod axes;
pub mod chart;
pub mod core;
pub mod error;
pub mod labeling;
pub mod telemetry;

pub use crate::chart::{Chart, FrameSnapshot, RowFrame, SeriesId};
pub use crate::core::{ChartConfig, RenderingOptions};
pub use crate::error::{ChartError, ChartResult};
pub use crate::labeling::{ExtendedWilkinson, LabelGenerator, LabelInclusion, LabelProps};
