/// Errors raised when criteria do not fit the measurement set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// The criteria name a column the set does not have
    #[error("Column {0} does not exist")]
    InvalidColumn(String),

    /// The target column holds text values
    #[error("Column {0} is not numeric and cannot be filtered")]
    NonNumericColumn(String),
}
