//! Transport layer abstraction for HTTP communication.
//!
//! The transport is a pluggable seam: the default implementation posts with
//! a blocking reqwest client, and tests substitute a mock so the signing
//! and orchestration layers are exercised without a live network. Each send
//! is a single blocking call; the underlying connection may be reused
//! across calls but is never driven concurrently by this crate.

use http::HeaderMap;
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

use super::response::SesResponse;
use crate::error::{SesError, SesResult};

/// Trait for HTTP transport implementations.
///
/// Implementations POST the given body with the given headers and hand back
/// the drained response. Any transport-level failure is reported as a
/// [`SesError::Client`].
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Issue an HTTP POST and return the response.
    fn execute(&self, url: &Url, headers: &HeaderMap, body: &[u8]) -> SesResult<SesResponse>;
}

/// Blocking reqwest-based transport.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aws_ses_backend::http::ReqwestTransport;
///
/// # fn example() -> Result<(), aws_ses_backend::SesError> {
/// let transport = ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10))?;
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given request and connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Client`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> SesResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .build()
            .map_err(|e| {
                SesError::client_with_source(format!("failed to create HTTP client: {}", e), e)
            })?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, url: &Url, headers: &HeaderMap, body: &[u8]) -> SesResult<SesResponse> {
        let response = self
            .client
            .post(url.clone())
            .headers(headers.clone())
            .body(body.to_vec())
            .send()?;

        SesResponse::from_reqwest(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_transport_is_object_safe() {
        let transport =
            ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10)).unwrap();
        let _: &dyn Transport = &transport;
    }
}
