//! Outgoing email message representation.
//!
//! [`EmailMessage`] is the in-memory message the backend accepts: sender,
//! recipient classes, subject, a single body with a declared content
//! subtype, and optional reply-to addresses. It carries no validation of
//! its own; absent optional fields simply translate to omitted or empty
//! payload keys.

/// Declared content subtype of a message body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentSubtype {
    /// Plain text body (the default).
    #[default]
    Plain,
    /// HTML body.
    Html,
}

/// An outgoing email message.
///
/// # Examples
///
/// ```
/// use aws_ses_backend::EmailMessage;
///
/// let message = EmailMessage::builder()
///     .from("sender@example.com")
///     .to("recipient@example.com")
///     .subject("Hello")
///     .body("Hello from SES")
///     .build();
///
/// assert_eq!(message.from_email, "sender@example.com");
/// assert_eq!(message.to, vec!["recipient@example.com"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailMessage {
    /// The sender address.
    pub from_email: String,
    /// "To" recipients.
    pub to: Vec<String>,
    /// "CC" recipients.
    pub cc: Vec<String>,
    /// "BCC" recipients.
    pub bcc: Vec<String>,
    /// The subject line.
    pub subject: String,
    /// The message body.
    pub body: String,
    /// Declared subtype of `body`.
    pub content_subtype: ContentSubtype,
    /// Reply-to addresses, when the message declares any.
    pub reply_to: Option<Vec<String>>,
}

impl EmailMessage {
    /// Create a new message builder.
    pub fn builder() -> EmailMessageBuilder {
        EmailMessageBuilder::default()
    }
}

/// Builder for [`EmailMessage`] with a fluent API.
///
/// # Examples
///
/// ```
/// use aws_ses_backend::{ContentSubtype, EmailMessage};
///
/// let message = EmailMessage::builder()
///     .from("sender@example.com")
///     .to("first@example.com")
///     .to("second@example.com")
///     .cc("cc@example.com")
///     .reply_to("replies@example.com")
///     .subject("Release notes")
///     .html_body("<h1>Shipped!</h1>")
///     .build();
///
/// assert_eq!(message.content_subtype, ContentSubtype::Html);
/// assert_eq!(message.to.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct EmailMessageBuilder {
    message: EmailMessage,
}

impl EmailMessageBuilder {
    /// Set the sender address.
    pub fn from(mut self, email: impl Into<String>) -> Self {
        self.message.from_email = email.into();
        self
    }

    /// Add a "To" recipient. Can be called multiple times.
    pub fn to(mut self, email: impl Into<String>) -> Self {
        self.message.to.push(email.into());
        self
    }

    /// Add a "CC" recipient. Can be called multiple times.
    pub fn cc(mut self, email: impl Into<String>) -> Self {
        self.message.cc.push(email.into());
        self
    }

    /// Add a "BCC" recipient. Can be called multiple times.
    pub fn bcc(mut self, email: impl Into<String>) -> Self {
        self.message.bcc.push(email.into());
        self
    }

    /// Add a reply-to address. Can be called multiple times.
    pub fn reply_to(mut self, email: impl Into<String>) -> Self {
        self.message
            .reply_to
            .get_or_insert_with(Vec::new)
            .push(email.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.message.subject = subject.into();
        self
    }

    /// Set a plain text body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.message.body = body.into();
        self.message.content_subtype = ContentSubtype::Plain;
        self
    }

    /// Set an HTML body.
    pub fn html_body(mut self, body: impl Into<String>) -> Self {
        self.message.body = body.into();
        self.message.content_subtype = ContentSubtype::Html;
        self
    }

    /// Override the declared content subtype.
    pub fn content_subtype(mut self, subtype: ContentSubtype) -> Self {
        self.message.content_subtype = subtype;
        self
    }

    /// Build the message.
    pub fn build(self) -> EmailMessage {
        self.message
    }
}
