//! Wire types for the SES v2 SendEmail API.
//!
//! These structs serialize to the exact JSON the `SendEmail` operation
//! expects. Recipient lists in [`Destination`] are always present (an
//! empty class serializes as an empty list, never an absent key) while
//! optional fields (`ReplyToAddresses`, the `Text`/`Html` body variants)
//! are omitted entirely when unset.

use serde::{Deserialize, Serialize};

/// The SendEmail request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    /// The sender address.
    pub from_email_address: String,
    /// Recipients by class.
    pub destination: Destination,
    /// Subject and body.
    pub content: EmailContent,
    /// Reply-to addresses; omitted when the message declares none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_addresses: Option<Vec<String>>,
}

/// Email destination (recipients).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    /// "To" recipients.
    pub to_addresses: Vec<String>,
    /// "CC" recipients.
    pub cc_addresses: Vec<String>,
    /// "BCC" recipients.
    pub bcc_addresses: Vec<String>,
}

/// Email content wrapper.
///
/// SES v2 distinguishes simple, raw, and templated content; this backend
/// sends simple content only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailContent {
    /// Simple (subject + body) content.
    pub simple: SimpleContent,
}

/// Subject and body of a simple email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimpleContent {
    /// The subject line.
    pub subject: Content,
    /// The message body.
    pub body: Body,
}

/// Message body: exactly one of the plain-text or HTML variants is
/// populated, selected by the source message's content subtype.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    /// Plain text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Content>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Content>,
}

/// A piece of content with its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    /// The content data.
    pub data: String,
}

impl Content {
    /// Create new content.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Successful SendEmail response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    /// Identifier assigned to the accepted message.
    pub message_id: String,
}
