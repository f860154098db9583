use serde::{Deserialize, Serialize};

/// Parameters for [`super::find_segments`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCriteria {
    /// Target column (matched ignoring case)
    pub column_name: String,

    /// Mean the column should stay near (fixed-mean mode only)
    pub target_mean: f64,

    /// Allowed distance from the mean, or half-width of a cluster in
    /// auto-detect mode. Negative values act as `0`.
    pub tolerance: f64,

    /// Shortest run reported. `0` acts as `1`.
    pub min_continuous_rows: usize,

    /// Disabled criteria never match anything
    pub enabled: bool,

    /// Find clusters instead of matching `target_mean`
    pub auto_detect_mean: bool,
}

impl MatchCriteria {
    /// Runs within `tolerance` of `target_mean`
    pub fn fixed(
        column_name: impl Into<String>,
        target_mean: f64,
        tolerance: f64,
        min_continuous_rows: usize,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            target_mean,
            tolerance,
            min_continuous_rows,
            enabled: true,
            auto_detect_mean: false,
        }
    }

    /// Runs whose values span at most `2 * tolerance`
    pub fn auto_detect(
        column_name: impl Into<String>,
        tolerance: f64,
        min_continuous_rows: usize,
    ) -> Self {
        Self {
            auto_detect_mean: true,
            ..Self::fixed(column_name, 0.0, tolerance, min_continuous_rows)
        }
    }

    /// Same criteria, switched off
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub(crate) fn effective_tolerance(&self) -> f64 {
        self.tolerance.max(0.0)
    }

    pub(crate) fn effective_min_rows(&self) -> usize {
        self.min_continuous_rows.max(1)
    }
}
