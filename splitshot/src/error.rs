use thiserror::Error;

/// Rejected input. Raised before any enumeration starts; the display text is user facing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No available shot.")]
    EmptySelection,
    #[error("Unknown shot size: {0}.")]
    UnknownWeightClass(String),
    #[error("Shot count must be greater than zero.")]
    NonPositiveCount,
    #[error("Shot count must be an integer.")]
    NonIntegerCount,
    #[error("Shot count is out of range.")]
    CountOutOfRange,
    #[error("Total shot weight must be greater than zero.")]
    NonPositiveTargetWeight,
    #[error("Total shot weight is out of range.")]
    TargetWeightOutOfRange,
    #[error("Combination count is too large to compute.")]
    CombinationCountOverflow,
}
