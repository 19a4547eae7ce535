//! SES client: signs and posts SendEmail requests.
//!
//! [`SesClient`] owns the per-send pipeline: serialize the payload exactly
//! once (the same bytes are hashed for signing and sent on the wire), build
//! the signed header set, POST through the transport, and classify the
//! outcome: a parsed [`SendEmailResponse`] on 2xx, otherwise the single
//! [`SesError::Client`] kind carrying the underlying reason.

use chrono::{DateTime, Utc};
use http::header::{HeaderMap, CONTENT_TYPE, HOST};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::config::SesConfig;
use crate::error::{SesError, SesResult};
use crate::http::{ReqwestTransport, SesResponse, Transport};
use crate::signing::sign_request;
use crate::types::{SendEmailRequest, SendEmailResponse};

/// POST path of the SES v2 SendEmail operation.
pub const SEND_EMAIL_PATH: &str = "/v2/email/outbound-emails";

/// Client for the SES v2 SendEmail API.
///
/// Construction validates the endpoint and builds the HTTP transport;
/// credentials are held for the client's lifetime and every send derives
/// its signing material fresh from the request timestamp and payload.
///
/// # Examples
///
/// ```no_run
/// use aws_ses_backend::{translate, EmailMessage, SesClient, SesConfig};
///
/// # fn example() -> Result<(), aws_ses_backend::SesError> {
/// let config = SesConfig::new("access_key", "secret_key", "us-west-2")?;
/// let client = SesClient::new(config)?;
///
/// let message = EmailMessage::builder()
///     .from("sender@example.com")
///     .to("recipient@example.com")
///     .subject("Hello")
///     .body("Hello from SES")
///     .build();
///
/// let response = client.send_email(&translate(&message))?;
/// println!("Message ID: {}", response.message_id);
/// # Ok(())
/// # }
/// ```
pub struct SesClient {
    config: SesConfig,
    transport: Arc<dyn Transport>,
    url: Url,
    host: String,
}

impl fmt::Debug for SesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SesClient")
            .field("config", &self.config)
            .field("transport", &"<dyn Transport>")
            .field("url", &self.url)
            .field("host", &self.host)
            .finish()
    }
}

impl SesClient {
    /// Create a new client with the default blocking transport.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Configuration`] for a malformed endpoint, or
    /// [`SesError::Client`] if the HTTP client cannot be constructed.
    pub fn new(config: SesConfig) -> SesResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(
            config.timeout(),
            config.connect_timeout(),
        )?);
        Self::with_transport(config, transport)
    }

    /// Create a new client with a custom transport.
    ///
    /// Useful for tests or alternative HTTP backends.
    pub fn with_transport(config: SesConfig, transport: Arc<dyn Transport>) -> SesResult<Self> {
        let endpoint = config.endpoint();
        let base = Url::parse(&endpoint).map_err(|e| {
            SesError::configuration(format!("invalid endpoint {}: {}", endpoint, e))
        })?;
        let url = base.join(SEND_EMAIL_PATH).map_err(|e| {
            SesError::configuration(format!("invalid endpoint {}: {}", endpoint, e))
        })?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(SesError::configuration(format!(
                    "endpoint {} has no host",
                    endpoint
                )))
            }
        };

        Ok(Self {
            config,
            transport,
            url,
            host,
        })
    }

    /// The region this client sends through.
    pub fn region(&self) -> &str {
        self.config.region()
    }

    /// Send an email, returning the parsed response.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Client`] on any transport failure, timeout,
    /// non-success status, or malformed response body. No retries are
    /// attempted.
    pub fn send_email(&self, request: &SendEmailRequest) -> SesResult<SendEmailResponse> {
        self.send_email_at(request, Utc::now())
    }

    fn send_email_at(
        &self,
        request: &SendEmailRequest,
        timestamp: DateTime<Utc>,
    ) -> SesResult<SendEmailResponse> {
        // Serialized exactly once: these bytes are both hashed for the
        // signature and sent as the request body.
        let payload = serde_json::to_vec(request)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HOST,
            self.host
                .parse()
                .map_err(|_| SesError::client("failed to build host header"))?,
        );
        headers.insert(
            CONTENT_TYPE,
            "application/json"
                .parse()
                .map_err(|_| SesError::client("failed to build content-type header"))?,
        );

        sign_request(
            "POST",
            self.url.path(),
            &[],
            &mut headers,
            &payload,
            self.config.credentials(),
            self.config.region(),
            &timestamp,
        )?;

        debug!(url = %self.url, bytes = payload.len(), "posting SendEmail request");

        let response = self.transport.execute(&self.url, &headers, &payload)?;
        self.classify(response)
    }

    /// Classify an HTTP outcome into a parsed response or a client error.
    fn classify(&self, response: SesResponse) -> SesResult<SendEmailResponse> {
        let status = response.status();
        debug!(
            status = status.as_u16(),
            request_id = response.request_id().unwrap_or("-"),
            "SES responded"
        );

        if !response.is_success() {
            let mut message = format!(
                "SES request failed with status {}: {}",
                status.as_u16(),
                response.error_message()
            );
            if let Some(request_id) = response.request_id() {
                message.push_str(&format!(" (request id {})", request_id));
            }
            return Err(SesError::client(message));
        }

        response.json()
    }
}
