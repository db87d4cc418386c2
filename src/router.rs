//! Radix-tree route table.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path and a
//! constructor for your route value; parsing hands back the value. That is
//! all. There is no handler in here: the table only answers "which route is
//! this", and the mounted stage decides what to do with the answer.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::parser::{RouteParser, RoutingError};
use crate::request_data::{RequestData, unescape_segment};

type Constructor<R> = Arc<dyn Fn(&Match<'_>) -> Result<R, RoutingError> + Send + Sync + 'static>;

/// A route table that parses requests into values of type `R`.
///
/// Build it once at startup and [`mount`](crate::App::mount) it. Each
/// [`Router::on`] call returns `self` so registrations chain naturally.
///
/// ```rust
/// use astor_routing::Router;
/// use http::Method;
///
/// enum Route {
///     User { id: u64 },
///     CreateUser,
/// }
///
/// let router = Router::new()
///     .on(Method::GET,  "/users/{id}", |m| Ok(Route::User { id: m.parse("id")? }))
///     .on(Method::POST, "/users",      |_| Ok(Route::CreateUser));
/// ```
pub struct Router<R> {
    routes: HashMap<Method, MatchitRouter<Constructor<R>>>,
}

impl<R: Send + 'static> Router<R> {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a constructor for a method + path pair. Returns `self` for
    /// chaining.
    ///
    /// Path parameters use `{name}` syntax and a trailing `{*rest}` catches
    /// the remainder. The constructor reads them through [`Match`].
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern or conflicts with a pattern
    /// already registered for `method`. Routes are static configuration, so
    /// this surfaces at startup.
    pub fn on<F>(mut self, method: Method, path: &str, constructor: F) -> Self
    where
        F: Fn(&Match<'_>) -> Result<R, RoutingError> + Send + Sync + 'static,
    {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, Arc::new(constructor) as Constructor<R>)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Methods whose tree knows `path`, sorted by name.
    fn allowed(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| method.clone())
            .collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }
}

impl<R: Send + 'static> Default for Router<R> {
    fn default() -> Self { Self::new() }
}

impl<R: Send + 'static> RouteParser for Router<R> {
    type Route = R;

    fn parse(&self, input: &RequestData) -> Result<R, RoutingError> {
        let path = input.path_string();

        let matched = self.routes
            .get(input.method())
            .and_then(|tree| tree.at(&path).ok());

        if let Some(matched) = matched {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), unescape_segment(v)))
                .collect();
            return (matched.value)(&Match { params, input });
        }

        let expected = self.allowed(&path);
        if expected.is_empty() {
            Err(RoutingError::NoMatch { path })
        } else {
            Err(RoutingError::MethodMismatch {
                path,
                expected,
                found: input.method().clone(),
            })
        }
    }
}

/// What a route constructor gets to look at: the captured path parameters
/// and the full request data.
pub struct Match<'a> {
    params: HashMap<String, String>,
    input: &'a RequestData,
}

impl Match<'_> {
    /// A captured path parameter, as text.
    ///
    /// For a route `/users/{id}`, `m.param("id")` on `/users/42` returns
    /// `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// A captured path parameter parsed into `T`. A missing or unparsable
    /// value is a [`RoutingError::InvalidParam`], so `?` inside a constructor
    /// turns it into a routing miss.
    pub fn parse<T>(&self, name: &str) -> Result<T, RoutingError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.param(name)
            .ok_or_else(|| RoutingError::invalid_param(name, "", "missing"))?;
        value.parse()
            .map_err(|e| RoutingError::invalid_param(name, value, e))
    }

    /// First value of a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.input.query(name)
    }

    pub fn data(&self) -> &RequestData {
        self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::request::Request;

    #[derive(Debug, PartialEq)]
    enum Route {
        User { id: u64 },
        CreateUser,
        Search { q: Option<String> },
        Asset(String),
        File(String),
        EditFile(String),
    }

    fn router() -> Router<Route> {
        Router::new()
            .on(Method::GET,  "/users/{id}",       |m| Ok(Route::User { id: m.parse("id")? }))
            .on(Method::POST, "/users",            |_| Ok(Route::CreateUser))
            .on(Method::GET,  "/search",           |m| Ok(Route::Search { q: m.query("q").map(str::to_owned) }))
            .on(Method::GET,  "/assets/{*file}",   |m| Ok(Route::Asset(m.param("file").unwrap_or_default().to_owned())))
            .on(Method::GET,  "/files/{name}",     |m| Ok(Route::File(m.parse("name")?)))
            .on(Method::GET,  "/files/{name}/edit", |m| Ok(Route::EditFile(m.parse("name")?)))
    }

    fn data(method: Method, target: &str) -> RequestData {
        let req: Request = http::Request::builder()
            .method(method)
            .uri(target)
            .body(Bytes::new())
            .unwrap()
            .into();
        RequestData::from_request(&req).unwrap()
    }

    #[test]
    fn parses_typed_params() {
        assert_eq!(router().parse(&data(Method::GET, "/users/42")), Ok(Route::User { id: 42 }));
        assert_eq!(router().parse(&data(Method::POST, "/users")), Ok(Route::CreateUser));
    }

    #[test]
    fn constructors_see_the_query() {
        assert_eq!(
            router().parse(&data(Method::GET, "/search?q=rust")),
            Ok(Route::Search { q: Some("rust".to_owned()) }),
        );
    }

    #[test]
    fn catch_all_captures_the_rest() {
        assert_eq!(
            router().parse(&data(Method::GET, "/assets/css/site.css")),
            Ok(Route::Asset("css/site.css".to_owned())),
        );
    }

    #[test]
    fn encoded_slash_is_part_of_the_param() {
        assert_eq!(
            router().parse(&data(Method::GET, "/files/42%2Fedit")),
            Ok(Route::File("42/edit".to_owned())),
        );
        assert_eq!(
            router().parse(&data(Method::GET, "/files/a%2Fb/edit")),
            Ok(Route::EditFile("a/b".to_owned())),
        );
        assert_eq!(
            router().parse(&data(Method::GET, "/files/50%25")),
            Ok(Route::File("50%".to_owned())),
        );
    }

    #[test]
    fn miss_description_keeps_encoded_slash() {
        let err = router().parse(&data(Method::GET, "/files/a%2Fb/c/d")).unwrap_err();
        assert_eq!(err, RoutingError::NoMatch { path: "/files/a%2Fb/c/d".to_owned() });
    }

    #[test]
    fn unknown_path_is_no_match() {
        let err = router().parse(&data(Method::GET, "/unknown")).unwrap_err();
        assert_eq!(err, RoutingError::NoMatch { path: "/unknown".to_owned() });
    }

    #[test]
    fn known_path_wrong_method_is_a_mismatch() {
        let err = router().parse(&data(Method::DELETE, "/users")).unwrap_err();
        assert_eq!(
            err,
            RoutingError::MethodMismatch {
                path: "/users".to_owned(),
                expected: vec![Method::POST],
                found: Method::DELETE,
            },
        );
    }

    #[test]
    fn unparsable_param_is_a_routing_error() {
        let err = router().parse(&data(Method::GET, "/users/abc")).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidParam { ref name, ref value, .. }
            if name == "id" && value == "abc"));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::<Route>::new()
            .on(Method::GET, "/users/{id}", |_| Ok(Route::CreateUser))
            .on(Method::GET, "/users/{name}", |_| Ok(Route::CreateUser));
    }
}
