//! Input validation

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::email_addresses::is_valid_email;

use super::SendConfig;

/// A single problem with the command-line input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The SMTP host is blank
    #[error("Invalid SMTP Host - {0}")]
    InvalidHost(String),

    /// The sender address is blank or malformed
    #[error("Invalid FROM Email - {0}")]
    InvalidFrom(String),

    /// A recipient address is blank or malformed
    #[error("Invalid TO Email - {0}")]
    InvalidTo(String),

    /// The body is blank
    #[error("Email body cannot be empty")]
    EmptyBody,
}

/// Validation errors in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Number of errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the input is valid
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors in order
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    fn push(&mut self, error: ValidationError) {
        debug!("validation error: {}", error);

        self.0.push(error);
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }

        Ok(())
    }
}

/// Runs every check against `config` and collects all failures.
///
/// Checks never short-circuit. Errors are reported host first, then sender,
/// then each bad recipient in order, then the body.
pub fn validate(config: &SendConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if config.smtp_host().trim().is_empty() {
        errors.push(ValidationError::InvalidHost(config.smtp_host().to_string()));
    }

    if !is_valid_email(config.from_address()) {
        errors.push(ValidationError::InvalidFrom(
            config.from_address().to_string(),
        ));
    }

    for address in config.to_addresses() {
        if !is_valid_email(address) {
            errors.push(ValidationError::InvalidTo(address.clone()));
        }
    }

    if config.body().trim().is_empty() {
        errors.push(ValidationError::EmptyBody);
    }

    errors
}

/// Decides whether a set of validation errors stops the send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail only when more than one check failed.
    ///
    /// A lone error lets delivery go ahead. This is the historical behaviour
    /// of the tool and stays the default.
    #[default]
    MoreThanOne,

    /// Fail on any error
    AnyError,
}

impl FailurePolicy {
    /// Returns `true` if `errors` should abort the send
    pub fn rejects(&self, errors: &ValidationErrors) -> bool {
        match self {
            Self::MoreThanOne => errors.len() > 1,
            Self::AnyError => !errors.is_empty(),
        }
    }
}
