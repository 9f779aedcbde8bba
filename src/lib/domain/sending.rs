//! Sending a single email: configuration, validation and the send service

pub mod config;
pub mod service;
pub mod validation;

pub use config::{split_recipients, SendConfig};
pub use service::{build_message, MailService, SendError};
pub use validation::{validate, FailurePolicy, ValidationError, ValidationErrors};
