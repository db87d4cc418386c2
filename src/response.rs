//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it, or return anything
//! that converts into one.

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;
use tracing::warn;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use astor_routing::{ContentType, Response};
/// use http::StatusCode;
///
/// Response::json(r#"{"id":1}"#);
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .bytes(ContentType::Json, r#"{"id":42}"#);
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Response {
    /// `200 OK` with `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().bytes(ContentType::Json, body)
    }

    /// `200 OK` with `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, headers: Vec::new(), body: Bytes::new() }
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the `http` type hyper writes to the wire.
    ///
    /// Headers that are not valid HTTP are dropped with a warning rather than
    /// failing the whole response.
    pub fn into_inner(self) -> http::Response<Full<Bytes>> {
        let length = self.body.len();
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;

        let map = res.headers_mut();
        map.insert(CONTENT_LENGTH, HeaderValue::from(length));
        for (name, value) in &self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    map.append(name, value);
                }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// typed body method, so you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(ContentType::Text, Bytes::from(body.into()))
    }

    /// Terminate with a typed body.
    pub fn bytes(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        self.finish(content_type, body.into())
    }

    /// Terminate with no body (e.g. `204 No Content`, redirects).
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }

    /// An explicit `content-type` header wins over `content_type`.
    fn finish(self, content_type: ContentType, body: Bytes) -> Response {
        let explicit = self.headers.iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        if !explicit {
            headers.push((CONTENT_TYPE.as_str().to_owned(), content_type.as_str().to_owned()));
        }
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement it on your own types to return them straight from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a bare status: `Ok(StatusCode::NO_CONTENT)`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

/// Override the status of any other response: `(StatusCode::CREATED, "made")`.
impl<T: IntoResponse> IntoResponse for (StatusCode, T) {
    fn into_response(self) -> Response {
        let mut res = self.1.into_response();
        res.status = self.0;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sets_content_type() {
        let res = Response::text("hi");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.header("Content-Type"), Some("text/plain; charset=utf-8"));
        assert_eq!(&res.body()[..], b"hi");
    }

    #[test]
    fn tuple_overrides_status() {
        let res = (StatusCode::CREATED, "made").into_response();
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(&res.body()[..], b"made");
    }

    #[test]
    fn into_inner_writes_length_and_headers() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/42")
            .header("bad header", "x")
            .bytes(ContentType::Json, "{}")
            .into_inner();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()["content-length"], "2");
        assert_eq!(res.headers()["content-type"], "application/json");
        assert_eq!(res.headers()["location"], "/users/42");
        assert_eq!(res.headers().len(), 3);
    }

    #[test]
    fn explicit_content_type_replaces_the_default() {
        let res = Response::builder()
            .header("Content-Type", "application/problem+json")
            .bytes(ContentType::Json, "{}")
            .into_inner();
        let values: Vec<_> = res.headers().get_all("content-type").iter().collect();
        assert_eq!(values, ["application/problem+json"]);
        assert_eq!(res.headers()["content-length"], "2");
    }
}
