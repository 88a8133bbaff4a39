//! Error type for the simulator.
//!
//! Every failure is a deterministic input-validation failure, so there is a
//! single kind. Validation runs before any randomness is drawn or any history
//! is touched: a failed call has no side effects.

use thiserror::Error;

/// Errors returned by pool generation, trial execution and batch runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied parameter is outside its domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// `n >= 1`.
pub(crate) fn check_pool_size(n: usize) -> Result<()> {
    if n < 1 {
        return Err(Error::invalid(format!("pool size must be >= 1, got {n}")));
    }
    Ok(())
}

/// `count >= 1`.
pub(crate) fn check_count(count: usize) -> Result<()> {
    if count < 1 {
        return Err(Error::invalid(format!(
            "trial count must be >= 1, got {count}"
        )));
    }
    Ok(())
}

/// `r` in the open interval `(0, 1)`. NaN is rejected.
pub(crate) fn check_fraction(r: f64) -> Result<()> {
    if !(r > 0.0 && r < 1.0) {
        return Err(Error::invalid(format!(
            "exploration fraction must be in (0, 1), got {r}"
        )));
    }
    Ok(())
}
