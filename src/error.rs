use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid row index {row}: chart has {rows} row(s)")]
    InvalidRow { row: usize, rows: usize },

    #[error("unknown series id {0}")]
    UnknownSeries(u64),

    #[error("series {id} holds {actual} data, not {requested}")]
    SeriesKindMismatch {
        id: u64,
        requested: &'static str,
        actual: &'static str,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
