use thiserror::Error;

pub type Result<T> = std::result::Result<T, RadarError>;

/// Errors raised by the simulator. Every error is reported at the call that detects it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RadarError {
    /// Malformed table, unparsable configuration text, non-numeric converter input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required radar parameter was never set
    #[error("radar configuration incomplete: {0}")]
    ConfigIncomplete(String),

    #[error("index {index} out of range for length {len}")]
    IndexError { index: usize, len: usize },

    /// Parameter outside its physical domain, e.g. a non-positive bandwidth
    #[error("domain error: {0}")]
    DomainError(String),
}

impl RadarError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RadarError::InvalidInput(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        RadarError::DomainError(msg.into())
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(RadarError::IndexError { index, len })
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if value > 0. && value.is_finite() {
        Ok(())
    } else {
        Err(RadarError::domain(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}
