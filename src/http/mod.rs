//! HTTP plumbing for SES API communication.
//!
//! Two small pieces sit under the client:
//!
//! - [`Transport`]: a pluggable blocking-POST seam, implemented by
//!   [`ReqwestTransport`] in production and mocked in tests
//! - [`SesResponse`]: the drained response with status, headers, body,
//!   request ID, and JSON/error-body parsing
//!
//! Outcome classification (success parse vs. the single client-error kind)
//! lives in [`crate::client::SesClient`], which owns the serialize-once,
//! sign, post sequence.

mod response;
mod transport;

pub use response::SesResponse;
pub use transport::{ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) use transport::MockTransport;
