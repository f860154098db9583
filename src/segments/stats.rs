use serde::Serialize;

/// Statistic names accepted by [`SegmentStatistics::get`]
pub const STATISTIC_NAMES: [&str; 4] = ["Mean", "StdDev", "Min", "Max"];

/// Summary of the target column's values within a segment.
///
/// Every field is `None` when the segment holds no numeric values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SegmentStatistics {
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Sample standard deviation (`n - 1`), `0` for a single value
    pub std_dev: Option<f64>,
    /// Smallest value
    pub min: Option<f64>,
    /// Largest value
    pub max: Option<f64>,
}

impl SegmentStatistics {
    /// Compute statistics over `values`
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std_dev = if values.len() == 1 {
            0.0
        } else {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean: Some(mean),
            std_dev: Some(std_dev),
            min: Some(min),
            max: Some(max),
        }
    }

    /// Statistic by name (`Mean`, `StdDev`, `Min`, `Max`), ignoring case.
    ///
    /// Returns `None` for an unknown name or an absent value.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name.to_ascii_lowercase().as_str() {
            "mean" => self.mean,
            "stddev" => self.std_dev,
            "min" => self.min,
            "max" => self.max,
            _ => None,
        }
    }

    /// `(name, value)` pairs in [`STATISTIC_NAMES`] order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        STATISTIC_NAMES.iter().map(move |name| (*name, self.get(name)))
    }
}
