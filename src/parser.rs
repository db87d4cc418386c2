//! The contract between a mounted stage and the router behind it.
//!
//! A [`RouteParser`] turns [`RequestData`] into a typed route value, or
//! explains in a [`RoutingError`] why it could not. How the parser is built is
//! its own business: a [`Router`](crate::Router) table, a hand-written
//! closure, or a combinator grammar all work the same once mounted.

use std::fmt::Write;

use http::Method;

use crate::request_data::RequestData;

/// Parses canonical request data into a typed route.
///
/// Parsing is synchronous and side-effect free. It runs on every request that
/// reaches the mounted stage, before any handler or downstream stage.
///
/// Closures implement it directly:
///
/// ```rust
/// use astor_routing::{RequestData, RouteParser, RoutingError};
///
/// enum Route { Home }
///
/// let home = |data: &RequestData| match data.path() {
///     [] => Ok(Route::Home),
///     _ => Err(RoutingError::no_match(data)),
/// };
/// # fn assert_parser<P: RouteParser>(_: &P) {}
/// # assert_parser(&home);
/// ```
pub trait RouteParser: Send + Sync + 'static {
    type Route: Send + 'static;

    fn parse(&self, input: &RequestData) -> Result<Self::Route, RoutingError>;
}

impl<F, R> RouteParser for F
where
    F: Fn(&RequestData) -> Result<R, RoutingError> + Send + Sync + 'static,
    R: Send + 'static,
{
    type Route = R;

    fn parse(&self, input: &RequestData) -> Result<R, RoutingError> {
        self(input)
    }
}

/// Why a parser did not produce a route.
///
/// The `Display` output is the human-readable description: it goes into the
/// info-level log line and, in development, into the diagnostic `404` body.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RoutingError {
    #[error("no route matches `{path}`")]
    NoMatch { path: String },

    #[error("method mismatch on `{path}`: expected {}, found {found}", join_methods(.expected))]
    MethodMismatch {
        path: String,
        expected: Vec<Method>,
        found: Method,
    },

    #[error("invalid value `{value}` for parameter `{name}`: {reason}")]
    InvalidParam {
        name: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl RoutingError {
    /// Nothing matched the request's path.
    pub fn no_match(input: &RequestData) -> Self {
        Self::NoMatch { path: input.path_string() }
    }

    pub fn invalid_param(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidParam {
            name: name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Free-form description, for parsers with their own vocabulary.
    pub fn other(description: impl Into<String>) -> Self {
        Self::Other(description.into())
    }
}

fn join_methods(methods: &[Method]) -> String {
    let mut out = String::new();
    for (i, method) in methods.iter().enumerate() {
        if i > 0 {
            out.push_str(" or ");
        }
        let _ = write!(out, "{method}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::request::Request;

    fn data(method: &str, target: &str) -> RequestData {
        let req: Request = http::Request::builder()
            .method(method)
            .uri(target)
            .body(Bytes::new())
            .unwrap()
            .into();
        RequestData::from_request(&req).unwrap()
    }

    #[test]
    fn closures_are_parsers() {
        let parser = |input: &RequestData| match input.path() {
            [first] if first == "ping" => Ok("pong"),
            _ => Err(RoutingError::no_match(input)),
        };
        assert_eq!(parser.parse(&data("GET", "/ping")), Ok("pong"));
        assert_eq!(
            parser.parse(&data("GET", "/pong")).unwrap_err().to_string(),
            "no route matches `/pong`",
        );
    }

    #[test]
    fn method_mismatch_lists_expected_methods() {
        let err = RoutingError::MethodMismatch {
            path: "/users".to_owned(),
            expected: vec![Method::GET, Method::PUT],
            found: Method::POST,
        };
        assert_eq!(err.to_string(), "method mismatch on `/users`: expected GET or PUT, found POST");
    }

    #[test]
    fn invalid_param_description() {
        let reason = "abc".parse::<u32>().unwrap_err();
        let err = RoutingError::invalid_param("id", "abc", reason);
        assert_eq!(
            err.to_string(),
            "invalid value `abc` for parameter `id`: invalid digit found in string",
        );
    }
}
