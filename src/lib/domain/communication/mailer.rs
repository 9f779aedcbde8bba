//! Mailer module

mod errors;
mod message;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;
pub use message::Message;

/// Delivers a [`Message`] through some mail transport
pub trait Mailer {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver. Every recipient in
    ///   [`Message::to`] receives the same copy.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    fn send_email(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Mailer for Mailer {
        fn send_email(&self, message: &Message) -> Result<(), MailerError>;
    }
}
