//! Send service

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::communication::mailer::{Mailer, MailerError, Message};

use super::{validate, FailurePolicy, SendConfig, ValidationErrors};

/// Why a send did not happen
#[derive(Debug, Error)]
pub enum SendError {
    /// The input was rejected by the [`FailurePolicy`]
    #[error("Please check your inputs\n{0}")]
    ValidationFailed(ValidationErrors),

    /// The mailer failed to deliver the message
    #[error("Failed sending mail - {0}")]
    DeliveryFailed(#[from] MailerError),
}

/// Builds the message described by `config`.
///
/// The body is always sent as `text/html`.
pub fn build_message(config: &SendConfig) -> Message {
    Message {
        from: config.from_address().to_string(),
        to: config.to_addresses().to_vec(),
        subject: config.subject().to_string(),
        html_body: config.body().to_string(),
    }
}

/// Validates a [`SendConfig`] and hands the resulting message to a [`Mailer`]
#[derive(Debug)]
pub struct MailService<M>
where
    M: Mailer,
{
    mailer: M,
    policy: FailurePolicy,
}

impl<M> MailService<M>
where
    M: Mailer,
{
    /// Creates a new send service.
    pub fn new(mailer: M, policy: FailurePolicy) -> Self {
        Self { mailer, policy }
    }

    /// Validates `config` and, unless the policy rejects it, makes exactly one
    /// delivery attempt.
    ///
    /// # Returns
    /// - [`Ok`] if the mailer accepted the message.
    /// - [`Err`] with [`SendError::ValidationFailed`] if the policy rejected the
    ///   input; the mailer is not called.
    /// - [`Err`] with [`SendError::DeliveryFailed`] if the mailer failed.
    pub fn send(&self, config: &SendConfig) -> Result<(), SendError> {
        let errors = validate(config);

        if self.policy.rejects(&errors) {
            return Err(SendError::ValidationFailed(errors));
        }

        if !errors.is_empty() {
            warn!(
                "continuing despite validation error ({:?} policy): {}",
                self.policy, errors
            );
        }

        let message = build_message(config);
        debug!("built message: {:?}", message);

        info!(
            "sending \"{}\" from {} to {}",
            message.subject,
            message.from,
            message.to.join(", ")
        );

        self.mailer.send_email(&message)?;

        info!("mail sent");

        Ok(())
    }
}
