//! Email backend orchestration.
//!
//! [`SesEmailBackend`] ties the pipeline together: translate each message,
//! sign, post, and decide what a failure means. It is the only layer that
//! knows about the fail-silently policy: the signing and HTTP layers
//! always propagate their errors, and the backend either surfaces them or
//! converts them into a "not sent" result.
//!
//! Batch sends process every message independently: one message failing
//! never prevents the remaining messages from being attempted.

use tracing::{debug, warn};

use crate::client::SesClient;
use crate::config::SesConfig;
use crate::error::{SesError, SesResult};
use crate::message::EmailMessage;
use crate::translate::translate;

/// Email backend that sends messages through the SES v2 API.
///
/// # Examples
///
/// ```no_run
/// use aws_ses_backend::{EmailMessage, SesConfig, SesEmailBackend};
///
/// # fn example() -> Result<(), aws_ses_backend::SesError> {
/// let config = SesConfig::new("access_key", "secret_key", "us-west-2")?;
/// let mut backend = SesEmailBackend::new(config).with_fail_silently(true);
///
/// let message = EmailMessage::builder()
///     .from("sender@example.com")
///     .to("recipient@example.com")
///     .subject("Hello")
///     .body("Hello from SES")
///     .build();
///
/// let sent = backend.send_messages(&[message])?;
/// println!("sent {} message(s)", sent);
/// # Ok(())
/// # }
/// ```
pub struct SesEmailBackend {
    config: SesConfig,
    fail_silently: bool,
    connection: Option<SesClient>,
}

impl SesEmailBackend {
    /// Create a new backend from a validated configuration.
    ///
    /// No connection is established until [`open`](Self::open) or the first
    /// [`send_messages`](Self::send_messages) call.
    pub fn new(config: SesConfig) -> Self {
        Self {
            config,
            fail_silently: false,
            connection: None,
        }
    }

    /// Set whether send failures are suppressed instead of propagated.
    pub fn with_fail_silently(mut self, fail_silently: bool) -> Self {
        self.fail_silently = fail_silently;
        self
    }

    /// Whether send failures are suppressed.
    pub fn fail_silently(&self) -> bool {
        self.fail_silently
    }

    /// The backend configuration.
    pub fn config(&self) -> &SesConfig {
        &self.config
    }

    /// Ensure a client connection exists.
    ///
    /// Returns `Ok(true)` when a new connection was created, `Ok(false)`
    /// when one was already open. Under fail-silently a construction
    /// failure is logged and reported as `Ok(false)` with no connection.
    pub fn open(&mut self) -> SesResult<bool> {
        if self.connection.is_some() {
            return Ok(false);
        }

        match SesClient::new(self.config.clone()) {
            Ok(client) => {
                self.connection = Some(client);
                Ok(true)
            }
            Err(err) if self.fail_silently => {
                warn!(error = %err, "suppressing connection failure");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Drop the client connection, if any.
    pub fn close(&mut self) {
        self.connection = None;
    }

    /// Send a single message.
    ///
    /// Returns `Ok(true)` when SES accepted the message, `Ok(false)` when
    /// the send failed and the backend is configured to fail silently.
    ///
    /// # Errors
    ///
    /// In non-silent mode, any [`SesError::Client`] from the
    /// translate/sign/post pipeline is propagated.
    pub fn send_message(&self, message: &EmailMessage) -> SesResult<bool> {
        match self.try_send(message) {
            Ok(()) => Ok(true),
            Err(err) if self.fail_silently => {
                warn!(error = %err, to = message.to.len(), "suppressing send failure");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn try_send(&self, message: &EmailMessage) -> SesResult<()> {
        let client = self
            .connection
            .as_ref()
            .ok_or_else(|| SesError::client("backend connection is not open"))?;

        let payload = translate(message);
        let response = client.send_email(&payload)?;
        debug!(message_id = %response.message_id, "message accepted");
        Ok(())
    }

    /// Send a batch of messages, returning the number sent successfully.
    ///
    /// Opens a connection if none exists and closes it again afterwards if
    /// it was opened here. Every message is attempted regardless of earlier
    /// failures; in non-silent mode the first error encountered is
    /// propagated once the whole batch has been processed.
    pub fn send_messages(&mut self, messages: &[EmailMessage]) -> SesResult<usize> {
        if messages.is_empty() {
            return Ok(0);
        }

        let opened = self.open()?;
        if self.connection.is_none() {
            // Silent connection failure: nothing was sent.
            return Ok(0);
        }

        let mut sent = 0;
        let mut first_err = None;
        for message in messages {
            match self.send_message(message) {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(err) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }

        if opened {
            self.close();
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(sent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{MockTransport, SesResponse};
    use http::StatusCode;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn test_config() -> SesConfig {
        SesConfig::new("test_access_key", "test_secret_key", "us-west-2").unwrap()
    }

    fn test_message() -> EmailMessage {
        EmailMessage::builder()
            .from("sender@example.com")
            .to("recipient@example.com")
            .subject("Test Subject")
            .body("Test Body")
            .build()
    }

    fn ok_response() -> SesResponse {
        SesResponse::new(
            StatusCode::OK,
            HashMap::new(),
            br#"{"MessageId": "test_message_id"}"#.to_vec(),
        )
    }

    fn backend_with(mock: MockTransport, fail_silently: bool) -> SesEmailBackend {
        let client = SesClient::with_transport(test_config(), Arc::new(mock)).unwrap();
        let mut backend = SesEmailBackend::new(test_config()).with_fail_silently(fail_silently);
        backend.connection = Some(client);
        backend
    }

    #[test]
    fn test_new_backend_has_no_connection() {
        let backend = SesEmailBackend::new(test_config());
        assert!(backend.connection.is_none());
        assert!(!backend.fail_silently());
    }

    #[test]
    fn test_config_exposed_unchanged() {
        let backend = SesEmailBackend::new(test_config());
        assert_eq!(backend.config().access_key(), "test_access_key");
        assert_eq!(backend.config().region(), "us-west-2");
    }

    #[test]
    fn test_open_creates_connection_once() {
        let mut backend = SesEmailBackend::new(test_config());

        assert!(backend.open().unwrap());
        assert!(backend.connection.is_some());

        // Second open reuses the existing connection.
        assert!(!backend.open().unwrap());
    }

    #[test]
    fn test_close_drops_connection() {
        let mut backend = SesEmailBackend::new(test_config());
        backend.open().unwrap();
        backend.close();
        assert!(backend.connection.is_none());
    }

    #[test]
    fn test_send_message_success() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_, _, _| Ok(ok_response()));

        let backend = backend_with(mock, false);
        assert!(backend.send_message(&test_message()).unwrap());
    }

    #[test]
    fn test_send_message_failure_propagates() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_, _, _| Err(SesError::client("connection refused")));

        let backend = backend_with(mock, false);
        let err = backend.send_message(&test_message()).unwrap_err();
        assert!(err.is_client());
    }

    #[test]
    fn test_send_message_failure_suppressed_when_silent() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_, _, _| Err(SesError::client("connection refused")));

        let backend = backend_with(mock, true);
        assert!(!backend.send_message(&test_message()).unwrap());
    }

    #[test]
    fn test_send_message_without_connection() {
        let backend = SesEmailBackend::new(test_config());
        assert!(backend.send_message(&test_message()).is_err());

        let silent = SesEmailBackend::new(test_config()).with_fail_silently(true);
        assert!(!silent.send_message(&test_message()).unwrap());
    }

    #[test]
    fn test_send_messages_counts_successes_in_silent_mode() {
        // Three sends: success, failure, success -> 2 sent, 3 attempts.
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut mock = MockTransport::new();
        mock.expect_execute().times(3).returning(move |_, _, _| {
            let call = seen.fetch_add(1, Ordering::SeqCst);
            if call == 1 {
                Err(SesError::client("transient failure"))
            } else {
                Ok(ok_response())
            }
        });

        let mut backend = backend_with(mock, true);
        let messages = vec![test_message(), test_message(), test_message()];

        let sent = backend.send_messages(&messages).unwrap();
        assert_eq!(sent, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_send_messages_attempts_all_before_propagating() {
        // Non-silent mode: the first failure is propagated, but only after
        // every message has been attempted.
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut mock = MockTransport::new();
        mock.expect_execute().times(3).returning(move |_, _, _| {
            let call = seen.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                Err(SesError::client("first failure"))
            } else {
                Ok(ok_response())
            }
        });

        let mut backend = backend_with(mock, false);
        let messages = vec![test_message(), test_message(), test_message()];

        let err = backend.send_messages(&messages).unwrap_err();
        assert!(err.to_string().contains("first failure"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_send_messages_empty_batch() {
        let mut backend = SesEmailBackend::new(test_config());
        assert_eq!(backend.send_messages(&[]).unwrap(), 0);
        assert!(backend.connection.is_none());
    }

    #[test]
    fn test_send_messages_keeps_existing_connection_open() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(1)
            .returning(|_, _, _| Ok(ok_response()));

        let mut backend = backend_with(mock, false);
        let sent = backend.send_messages(&[test_message()]).unwrap();

        assert_eq!(sent, 1);
        // The connection was supplied externally, so the batch must not
        // close it.
        assert!(backend.connection.is_some());
    }

    #[test]
    fn test_send_messages_all_succeed() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .times(2)
            .returning(|_, _, _| Ok(ok_response()));

        let mut backend = backend_with(mock, false);
        let sent = backend
            .send_messages(&[test_message(), test_message()])
            .unwrap();
        assert_eq!(sent, 2);
    }
}
