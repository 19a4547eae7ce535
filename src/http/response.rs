//! HTTP response handling for the SES API.
//!
//! Wraps a raw HTTP response with the pieces the client needs: status,
//! lower-cased headers, body bytes, the `x-amzn-RequestId` for diagnostics,
//! JSON parsing, and extraction of the service's own error message from a
//! failed response body.

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{SesError, SesResult};

/// Maximum number of body bytes echoed into an error message.
const ERROR_BODY_EXCERPT_LEN: usize = 256;

/// A response from the SES API.
#[derive(Debug, Clone)]
pub struct SesResponse {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    request_id: Option<String>,
}

impl SesResponse {
    /// Create a new response from its parts.
    ///
    /// Header names are expected lower-cased; the AWS request ID is pulled
    /// from the usual header spellings when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use aws_ses_backend::http::SesResponse;
    /// use http::StatusCode;
    /// use std::collections::HashMap;
    ///
    /// let response = SesResponse::new(StatusCode::OK, HashMap::new(), b"{}".to_vec());
    /// assert!(response.is_success());
    /// ```
    pub fn new(status: StatusCode, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let request_id = headers
            .get("x-amzn-requestid")
            .or_else(|| headers.get("x-amzn-request-id"))
            .or_else(|| headers.get("x-amz-request-id"))
            .cloned();

        Self {
            status,
            headers,
            body,
            request_id,
        }
    }

    /// Create a response by draining a blocking reqwest response.
    pub(crate) fn from_reqwest(response: reqwest::blocking::Response) -> SesResult<Self> {
        let status = response.status();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), value_str.to_string());
            }
        }

        let body = response
            .bytes()
            .map_err(|e| {
                SesError::client_with_source(format!("failed to read response body: {}", e), e)
            })?
            .to_vec();

        Ok(Self::new(status, headers, body))
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True if the status is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Look up a header value, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The AWS request ID, when the service supplied one.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Client`] when the body is not valid JSON of the
    /// expected shape.
    pub fn json<T: DeserializeOwned>(&self) -> SesResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            SesError::client_with_source(format!("failed to parse response body: {}", e), e)
        })
    }

    /// Best-effort human-readable reason for a failed response.
    ///
    /// SES returns errors as JSON like
    /// `{"__type": "MessageRejected", "message": "Email address is not verified"}`;
    /// when the body parses as that shape its message is used, otherwise a
    /// short excerpt of the raw body stands in.
    pub fn error_message(&self) -> String {
        if let Ok(parsed) = serde_json::from_slice::<AwsErrorBody>(&self.body) {
            if let Some(message) = parsed.message {
                return match parsed.error_type {
                    Some(error_type) => format!("{}: {}", strip_namespace(&error_type), message),
                    None => message,
                };
            }
        }

        let excerpt = String::from_utf8_lossy(&self.body);
        let excerpt = excerpt.trim();
        if excerpt.is_empty() {
            "empty response body".to_string()
        } else if excerpt.chars().count() > ERROR_BODY_EXCERPT_LEN {
            let truncated: String = excerpt.chars().take(ERROR_BODY_EXCERPT_LEN).collect();
            format!("{}...", truncated)
        } else {
            excerpt.to_string()
        }
    }
}

/// The JSON error body shape returned by the SES v2 API.
#[derive(Debug, Deserialize)]
struct AwsErrorBody {
    #[serde(alias = "__type", alias = "Type", alias = "code")]
    error_type: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Strip the namespace prefix some AWS error types carry,
/// e.g. `com.amazon.coral.service#MessageRejected` -> `MessageRejected`.
fn strip_namespace(error_type: &str) -> &str {
    match error_type.rfind('#') {
        Some(pos) => &error_type[pos + 1..],
        None => error_type,
    }
}
