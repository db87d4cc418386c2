//! Canonical request data consumed by route parsers.
//!
//! A [`RequestData`] is a decoded, immutable snapshot of a [`Request`]: path
//! split into percent-decoded segments, query parsed into a multimap, header
//! names lowercased. Route parsers only ever see this form.
//!
//! Not every request has one. An asterisk-form target (`OPTIONS *`), an
//! authority-form target (`CONNECT host:443`), or a path or query that
//! decodes to invalid UTF-8 cannot be represented, and
//! [`RequestData::from_request`] returns `None`. A mounted router treats that
//! as "not mine" and hands the request to the next stage without parsing or
//! logging.
//!
//! Header values never make a request unrepresentable. Bytes that are not
//! UTF-8 are replaced with `U+FFFD`.

use bytes::Bytes;
use http::Method;

use crate::request::Request;

/// Ordered multimap of decoded names to values.
type Pairs = Vec<(String, Vec<String>)>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestData {
    method: Method,
    path: Vec<String>,
    query: Pairs,
    headers: Pairs,
    body: Bytes,
}

impl RequestData {
    /// Canonicalises `req`, or returns `None` when it has no canonical form.
    pub fn from_request(req: &Request) -> Option<Self> {
        let path = decode_path(req.path())?;
        let query = match req.query() {
            Some(raw) => decode_query(raw)?,
            None => Vec::new(),
        };

        let mut headers: Pairs = Vec::new();
        for (name, value) in req.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            // `HeaderName` is already lowercase.
            push_pair(&mut headers, name.as_str().to_owned(), value);
        }

        Some(Self {
            method: req.method().clone(),
            path,
            query,
            headers,
            body: req.body().clone(),
        })
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Decoded, non-empty path segments. `/users//42/` gives `["users", "42"]`.
    pub fn path(&self) -> &[String] { &self.path }

    /// The segments joined back into `/a/b` form. The root path is `/`.
    ///
    /// A `/` or `%` inside a segment stays escaped as `%2F` or `%25`, so the
    /// string splits back into exactly the same segments.
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            return "/".to_owned();
        }
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            for c in segment.chars() {
                match c {
                    '%' => out.push_str("%25"),
                    '/' => out.push_str("%2F"),
                    c => out.push(c),
                }
            }
        }
        out
    }

    /// First value of a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        lookup(&self.query, name).and_then(|v| v.first()).map(String::as_str)
    }

    /// Every value of a query parameter, in order of appearance.
    pub fn query_all(&self, name: &str) -> &[String] {
        lookup(&self.query, name).unwrap_or_default()
    }

    /// First value of a header. Case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        lookup(&self.headers, &name).and_then(|v| v.first()).map(String::as_str)
    }
}

fn decode_path(path: &str) -> Option<Vec<String>> {
    if !path.starts_with('/') {
        return None;
    }
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).ok().map(|s| s.into_owned()))
        .collect()
}

/// Reverses the escaping done by [`RequestData::path_string`] on a piece of
/// that string, such as a captured route parameter.
pub(crate) fn unescape_segment(escaped: &str) -> String {
    escaped.replace("%2F", "/").replace("%25", "%")
}

fn decode_query(raw: &str) -> Option<Pairs> {
    let mut pairs = Vec::new();
    for item in raw.split('&').filter(|s| !s.is_empty()) {
        let (name, value) = item.split_once('=').unwrap_or((item, ""));
        push_pair(&mut pairs, decode_form(name)?, decode_form(value)?);
    }
    Some(pairs)
}

/// `application/x-www-form-urlencoded` component: `+` is a space.
fn decode_form(s: &str) -> Option<String> {
    let spaced = s.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

fn push_pair(pairs: &mut Pairs, name: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == name) {
        Some((_, values)) => values.push(value),
        None => pairs.push((name, vec![value])),
    }
}

fn lookup<'a>(pairs: &'a Pairs, name: &str) -> Option<&'a [String]> {
    pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_slice())
}
