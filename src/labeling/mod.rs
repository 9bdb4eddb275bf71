pub mod wilkinson;

use serde::{Deserialize, Serialize};

pub use wilkinson::ExtendedWilkinson;

/// Which side of the data interval a produced label span may land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelInclusion {
    /// Any label span is acceptable.
    Any,
    /// The label span must strictly contain the data interval.
    #[default]
    Included,
    /// The label span must lie strictly inside the data interval.
    Excluded,
}

impl LabelInclusion {
    #[must_use]
    pub(crate) fn accepts(self, data_min: f64, data_max: f64, label_min: f64, label_max: f64) -> bool {
        match self {
            Self::Any => true,
            Self::Included => label_min < data_min && label_max > data_max,
            Self::Excluded => label_min > data_min && label_max < data_max,
        }
    }
}

/// One resolved tick sequence: `min, min + step, ..., max`.
///
/// `labels` is sorted ascending and uniformly spaced by `step`;
/// `labels[0] == min` and `labels[last] == max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProps {
    pub labels: Vec<f64>,
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl LabelProps {
    #[must_use]
    pub(crate) fn single(value: f64) -> Self {
        Self {
            labels: vec![value],
            step: 1.0,
            min: value,
            max: value,
        }
    }
}

/// Tick-sequence generator for one axis.
///
/// Implementations must be deterministic: identical inputs yield identical
/// output, so renderers can cache results across frames.
pub trait LabelGenerator: Send + Sync {
    fn generate(
        &self,
        data_min: f64,
        data_max: f64,
        max_labels: usize,
        inclusion: LabelInclusion,
    ) -> LabelProps;
}
