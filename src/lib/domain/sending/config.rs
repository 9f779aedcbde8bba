//! Send configuration

use std::{fmt, time::Duration};

/// Default SMTP port
pub const DEFAULT_PORT: u16 = 25;

/// Default connection timeout, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Default HTML body
pub const DEFAULT_BODY: &str = "This is a test mail";

/// Default subject line
pub const DEFAULT_SUBJECT: &str = "test mail";

/// Splits a `;` separated recipient list.
///
/// Segments are kept verbatim, so empty and whitespace-only segments survive
/// the split and are left for validation to reject.
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(';').map(String::from).collect()
}

/// Everything needed to send one email, as given on the command line.
///
/// Built once per invocation and only read afterwards. Use [`Default`] and the
/// `with_*` methods to build one.
#[derive(Clone, PartialEq, Eq)]
pub struct SendConfig {
    from_address: String,
    to_addresses: Vec<String>,
    subject: String,
    body: String,
    smtp_host: String,
    smtp_port: u16,
    username: String,
    password: String,
    use_ssl: bool,
    timeout_seconds: u64,
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            from_address: String::new(),
            to_addresses: split_recipients(""),
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
            smtp_host: String::new(),
            smtp_port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            use_ssl: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl SendConfig {
    /// Sets the sender address
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from_address = from.into();
        self
    }

    /// Sets the recipients from a `;` separated list
    pub fn with_recipients(mut self, raw: &str) -> Self {
        self.to_addresses = split_recipients(raw);
        self
    }

    /// Sets the subject line
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the HTML body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the SMTP host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.smtp_host = host.into();
        self
    }

    /// Sets the SMTP port
    pub fn with_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }

    /// Sets the SMTP credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets whether the connection uses implicit TLS
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Sets the timeout, in seconds
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// The sender address
    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// The recipients, in the order given
    pub fn to_addresses(&self) -> &[String] {
        &self.to_addresses
    }

    /// The subject line
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The HTML body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The SMTP host
    pub fn smtp_host(&self) -> &str {
        &self.smtp_host
    }

    /// The SMTP port
    pub fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    /// The SMTP username; empty when no authentication is wanted
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The SMTP password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether the connection uses implicit TLS
    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    /// The timeout for the SMTP connection
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl fmt::Debug for SendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendConfig")
            .field("from_address", &self.from_address)
            .field("to_addresses", &self.to_addresses)
            .field("subject", &self.subject)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("use_ssl", &self.use_ssl)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}
