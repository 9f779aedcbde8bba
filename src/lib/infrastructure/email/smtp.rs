//! SMTP email service implementation

use std::{fmt, time::Duration};

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    SmtpTransport, Transport,
};
use tracing::{debug, warn};

use crate::domain::{
    communication::mailer::{Mailer, MailerError, Message},
    sending::SendConfig,
};

/// How TLS is negotiated with the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// TLS from the first byte of the connection
    Wrapper,

    /// Plaintext, upgraded with STARTTLS when the server offers it
    Opportunistic,
}

/// TLS settings applied to the SMTP connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsSettings {
    /// How TLS is negotiated
    pub mode: TlsMode,

    /// Accept certificates that fail chain validation
    pub accept_invalid_certs: bool,

    /// Accept certificates issued for a different host
    pub accept_invalid_hostnames: bool,
}

impl TlsSettings {
    /// Returns `true` if the server certificate is not checked at all
    pub fn skips_verification(&self) -> bool {
        self.accept_invalid_certs && self.accept_invalid_hostnames
    }
}

/// SMTP configuration
#[derive(Clone, PartialEq, Eq)]
pub struct SMTPConfig {
    /// The SMTP host
    pub host: String,

    /// The SMTP port
    pub port: u16,

    /// The SMTP username; no authentication is attempted when empty
    pub username: String,

    /// The SMTP password
    pub password: String,

    /// Use implicit TLS instead of opportunistic STARTTLS
    pub ssl: bool,

    /// Connection and command timeout; zero means no timeout
    pub timeout: Duration,
}

impl SMTPConfig {
    /// The TLS settings for this connection.
    ///
    /// Certificate verification is off in both modes. This matches the
    /// behaviour the tool has always had and is a known weakness: anyone able
    /// to intercept the connection can read the credentials and the message.
    pub fn tls_settings(&self) -> TlsSettings {
        TlsSettings {
            mode: if self.ssl {
                TlsMode::Wrapper
            } else {
                TlsMode::Opportunistic
            },
            accept_invalid_certs: true,
            accept_invalid_hostnames: true,
        }
    }

    /// The timeout handed to the transport, `None` when it is zero
    pub fn transport_timeout(&self) -> Option<Duration> {
        if self.timeout.is_zero() {
            return None;
        }

        Some(self.timeout)
    }

    /// The credentials to authenticate with, if any.
    ///
    /// When set, the server must offer a compatible `AUTH` mechanism or the
    /// send fails.
    pub fn credentials(&self) -> Option<Credentials> {
        if self.username.is_empty() {
            return None;
        }

        Some(Credentials::new(
            self.username.clone(),
            self.password.clone(),
        ))
    }
}

impl From<&SendConfig> for SMTPConfig {
    fn from(config: &SendConfig) -> Self {
        Self {
            host: config.smtp_host().to_string(),
            port: config.smtp_port(),
            username: config.username().to_string(),
            password: config.password().to_string(),
            ssl: config.use_ssl(),
            timeout: config.timeout(),
        }
    }
}

impl fmt::Debug for SMTPConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("ssl", &self.ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// SMTP mailer
#[derive(Debug, Clone)]
pub struct SMTPMailer {
    config: SMTPConfig,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }

    /// Builds the SMTP transport. No connection is made until a message is sent.
    pub fn mailer(&self) -> Result<SmtpTransport, MailerError> {
        let settings = self.config.tls_settings();

        if settings.skips_verification() {
            warn!(
                "TLS certificate verification is disabled for {}",
                self.config.host
            );
        }

        let parameters = TlsParameters::builder(self.config.host.clone())
            .dangerous_accept_invalid_certs(settings.accept_invalid_certs)
            .dangerous_accept_invalid_hostnames(settings.accept_invalid_hostnames)
            .build()
            .map_err(anyhow::Error::from)?;

        let tls = match settings.mode {
            TlsMode::Wrapper => Tls::Wrapper(parameters),
            TlsMode::Opportunistic => Tls::Opportunistic(parameters),
        };

        let mut builder = SmtpTransport::builder_dangerous(self.config.host.as_str())
            .port(self.config.port)
            .tls(tls)
            .timeout(self.config.transport_timeout());

        if let Some(creds) = self.config.credentials() {
            builder = builder.credentials(creds);
        }

        debug!("SMTP transport configured: {:?}", self.config);

        Ok(builder.build())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailerError> {
    address
        .parse()
        .map_err(|_| MailerError::InvalidEmail(address.to_string()))
}

/// Converts a [`Message`] into a lettre message with an HTML body
pub fn lettre_message(message: &Message) -> Result<lettre::Message, MailerError> {
    let mut builder = lettre::Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_HTML);

    for to in &message.to {
        builder = builder.to(mailbox(to)?);
    }

    builder
        .body(message.html_body.clone())
        .map_err(|e| MailerError::UnknownError(e.into()))
}

impl Mailer for SMTPMailer {
    #[mutants::skip]
    fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let email = lettre_message(message)?;

        match self.mailer()?.send(&email) {
            Ok(_) => Ok(()),
            Err(e) => Err(MailerError::UnknownError(e.into())),
        }
    }
}
