//! Translation from an outgoing message to the SendEmail wire payload.
//!
//! A total function with no error paths: recipient lists are copied
//! verbatim (empty classes become empty lists, not absent keys), the body
//! lands in the `Text` or `Html` variant according to the declared content
//! subtype, and `ReplyToAddresses` appears only when the message declares
//! reply-to addresses.

use crate::message::{ContentSubtype, EmailMessage};
use crate::types::{Body, Content, Destination, EmailContent, SendEmailRequest, SimpleContent};

/// Convert an [`EmailMessage`] into the [`SendEmailRequest`] payload.
///
/// # Examples
///
/// ```
/// use aws_ses_backend::{translate, EmailMessage};
///
/// let message = EmailMessage::builder()
///     .from("sender@example.com")
///     .to("recipient@example.com")
///     .subject("Hi")
///     .body("Hello")
///     .build();
///
/// let payload = translate(&message);
/// assert_eq!(payload.from_email_address, "sender@example.com");
/// assert_eq!(payload.content.simple.body.text.unwrap().data, "Hello");
/// ```
pub fn translate(message: &EmailMessage) -> SendEmailRequest {
    let body = match message.content_subtype {
        ContentSubtype::Html => Body {
            text: None,
            html: Some(Content::new(&*message.body)),
        },
        ContentSubtype::Plain => Body {
            text: Some(Content::new(&*message.body)),
            html: None,
        },
    };

    SendEmailRequest {
        from_email_address: message.from_email.clone(),
        destination: Destination {
            to_addresses: message.to.clone(),
            cc_addresses: message.cc.clone(),
            bcc_addresses: message.bcc.clone(),
        },
        content: EmailContent {
            simple: SimpleContent {
                subject: Content::new(&*message.subject),
                body,
            },
        },
        reply_to_addresses: message.reply_to.clone(),
    }
}
