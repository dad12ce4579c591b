use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FigLayoutCommonError {
    #[error("Margins-like argument must have 1 to 4 values, got {0}")]
    InvalidMarginsLength(usize),

    #[error("Expected a scalar or {expected} values (one per gap), got {got}")]
    InvalidGapsLength { expected: usize, got: usize },

    #[error("Invalid {name} `{value}`, expected one of {valid:?}")]
    InvalidChoice {
        name: &'static str,
        value: String,
        valid: &'static [&'static str],
    },

    #[error("At least {min} values are required, got {got}")]
    TooFewValues { min: usize, got: usize },

    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Cannot determine bin sizes of unevenly spaced centers without a lower or upper bound")]
    UnevenBins,
}
