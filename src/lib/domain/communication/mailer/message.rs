//! Email message

/// A single HTML email, built once per send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The sender of the email
    pub from: String,

    /// The recipients of the email, in the order they were given
    pub to: Vec<String>,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,
}

impl Message {
    /// The MIME type of [`Message::html_body`]
    pub const CONTENT_TYPE: &'static str = "text/html";
}
