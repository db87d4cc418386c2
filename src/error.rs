//! Error types.
//!
//! Two families live here. [`Error`] covers infrastructure failures that stop
//! the server from starting or running. [`BoxError`] is what flows through the
//! request pipeline: handler and downstream failures travel in it untouched,
//! so callers can `downcast_ref` them back to their concrete type.

use std::net::AddrParseError;

use http::StatusCode;

/// Type-erased error carried through the middleware chain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Infrastructure errors: binding to a port, accepting a connection, or
/// reading configuration.
///
/// Request-level failures are not `Error`s. They are [`BoxError`]s returned
/// from handlers and responders, or HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid {var} value `{value}` (expected development, testing or production)")]
    Environment { var: &'static str, value: String },
}

/// A request failure that maps onto an HTTP status.
///
/// Return it (boxed) from a handler or responder to stop processing with a
/// specific status. The server turns it into a response whose body is the
/// reason text; any other error becomes a bare `500`.
///
/// ```rust
/// use astor_routing::{Abort, BoxError};
/// use http::StatusCode;
///
/// fn check(token: Option<&str>) -> Result<(), BoxError> {
///     token.ok_or_else(|| Abort::new(StatusCode::UNAUTHORIZED))?;
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {reason}")]
pub struct Abort {
    status: StatusCode,
    reason: String,
}

impl Abort {
    /// An abort with the status's canonical reason phrase.
    pub fn new(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or_default().to_owned();
        Self { status, reason }
    }

    pub fn with_reason(status: StatusCode, reason: impl Into<String>) -> Self {
        Self { status, reason: reason.into() }
    }

    /// `404 Not Found`, what the default end of the chain fails with.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn reason(&self) -> &str { &self.reason }
}

impl From<StatusCode> for Abort {
    fn from(status: StatusCode) -> Self {
        Self::new(status)
    }
}
