//! Mounted routers.
//!
//! A routing stage runs the same protocol for every request:
//!
//! ```text
//! request ─ adapt ─┬─ None ──────────────────────────────▶ next (verbatim)
//!                  └─ Some(data) ─ parse ─┬─ Ok(route) ──▶ handler (errors pass through)
//!                                         └─ Err(miss) ──▶ next ─▶ fallback::recover
//! ```
//!
//! There are two stages with that protocol. [`RoutingMiddleware`] awaits the
//! handler and the rest of the chain in straight-line code.
//! [`FutureRoutingMiddleware`] composes the same steps from future
//! combinators. They share `attempt` for the first half and
//! [`fallback::recover`] for the second, so they cannot disagree about the
//! outcome.

use futures_util::future::{BoxFuture, FutureExt, TryFutureExt};

use crate::environment::Environment;
use crate::error::BoxError;
use crate::handler::{FutureHandler, Handler, Outcome};
use crate::middleware::{Middleware, Next, fallback};
use crate::parser::{RouteParser, RoutingError};
use crate::request::Request;
use crate::request_data::RequestData;
use crate::response::IntoResponse;

/// Result of adapting and parsing one request.
#[derive(Debug)]
pub(crate) enum Attempt<R> {
    /// The request has no canonical form. Not a routing miss: nothing is
    /// logged and the next stage's result is returned as is.
    Unadapted,
    Matched(R),
    Missed(RoutingError),
}

pub(crate) fn attempt<P: RouteParser>(parser: &P, req: &Request) -> Attempt<P::Route> {
    let Some(data) = RequestData::from_request(req) else {
        return Attempt::Unadapted;
    };
    match parser.parse(&data) {
        Ok(route) => Attempt::Matched(route),
        Err(miss) => Attempt::Missed(miss),
    }
}

// ── Direct suspension ─────────────────────────────────────────────────────────

/// Routing stage whose handler is awaited directly.
///
/// Built by [`App::mount`](crate::App::mount).
pub struct RoutingMiddleware<P, H> {
    parser: P,
    handler: H,
    environment: Environment,
}

impl<P, H> RoutingMiddleware<P, H> {
    pub fn new(parser: P, handler: H, environment: Environment) -> Self {
        Self { parser, handler, environment }
    }
}

impl<P, H> Middleware for RoutingMiddleware<P, H>
where
    P: RouteParser,
    H: Handler<P::Route>,
{
    fn respond<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Outcome> {
        async move {
            match attempt(&self.parser, &req) {
                Attempt::Unadapted => next.run(req).await,
                Attempt::Matched(route) => Handler::call(&self.handler, req, route)
                    .await
                    .map(IntoResponse::into_response)
                    .map_err(Into::into),
                Attempt::Missed(miss) => {
                    let downstream = next.run(req).await;
                    fallback::recover(miss, downstream, self.environment)
                }
            }
        }
        .boxed()
    }
}

// ── Future combinators ────────────────────────────────────────────────────────

/// Routing stage whose handler returns a future value that is chained rather
/// than awaited.
///
/// Built by [`App::mount_future`](crate::App::mount_future).
pub struct FutureRoutingMiddleware<P, H> {
    parser: P,
    handler: H,
    environment: Environment,
}

impl<P, H> FutureRoutingMiddleware<P, H> {
    pub fn new(parser: P, handler: H, environment: Environment) -> Self {
        Self { parser, handler, environment }
    }
}

impl<P, H> Middleware for FutureRoutingMiddleware<P, H>
where
    P: RouteParser,
    H: FutureHandler<P::Route>,
{
    fn respond<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Outcome> {
        match attempt(&self.parser, &req) {
            Attempt::Unadapted => next.run(req),
            Attempt::Matched(route) => FutureHandler::call(&self.handler, req, route)
                .map_ok(IntoResponse::into_response)
                .map_err(Into::<BoxError>::into)
                .boxed(),
            Attempt::Missed(miss) => {
                let environment = self.environment;
                next.run(req)
                    .map(move |downstream| fallback::recover(miss, downstream, environment))
                    .boxed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn request(target: &str) -> Request {
        http::Request::builder()
            .uri(target)
            .body(Bytes::new())
            .unwrap()
            .into()
    }

    fn users(data: &RequestData) -> Result<u64, RoutingError> {
        match data.path() {
            [users, id] if users == "users" => id
                .parse()
                .map_err(|e| RoutingError::invalid_param("id", id.as_str(), e)),
            _ => Err(RoutingError::no_match(data)),
        }
    }

    #[test]
    fn attempt_matches() {
        assert!(matches!(attempt(&users, &request("/users/42")), Attempt::Matched(42)));
    }

    #[test]
    fn attempt_misses() {
        assert!(matches!(
            attempt(&users, &request("/teams/1")),
            Attempt::Missed(RoutingError::NoMatch { .. }),
        ));
    }

    #[test]
    fn attempt_skips_parsing_unrepresentable_requests() {
        let parser = |_: &RequestData| -> Result<u64, RoutingError> {
            panic!("parser must not run for unrepresentable requests")
        };
        assert!(matches!(attempt(&parser, &request("/bad/%FF")), Attempt::Unadapted));
    }
}
