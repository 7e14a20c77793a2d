// src/error.rs

use thiserror::Error;

/// Failures raised by the policy optimizer itself.
///
/// All of these are fatal for the call that produced them; the optimizer is a
/// pure computation and never retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Unsupported policy type: {0}")]
    UnsupportedPolicy(String),

    #[error("invalid parameter `{field}`: {message}")]
    InvalidParameter {
        field: &'static str,
        message: String,
    },

    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),
}

impl PolicyError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

/// Errors at the file/CLI edge of the crate.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
pub type AppResult<T> = Result<T, AppError>;
