//! Middleware layer.
//!
//! An [`App`](crate::App) is an ordered list of [`Middleware`] stages ending
//! in a [`Responder`]. Each stage gets the request and a [`Next`] handle for
//! the rest of the chain. It may answer on its own, pass the request on, or
//! pass it on and then look at what came back.
//!
//! Mounted routers are stages too: see [`routing`] for the two flavours and
//! [`fallback`] for what happens when a router and everything after it fail.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::handler::{Outcome, Responder};
use crate::request::Request;

pub mod fallback;
pub mod routing;

pub use routing::{FutureRoutingMiddleware, RoutingMiddleware};

/// One stage of the pipeline.
///
/// ```rust
/// use astor_routing::middleware::{Middleware, Next};
/// use astor_routing::{Outcome, Request};
/// use futures_util::future::{BoxFuture, FutureExt};
///
/// struct Passthrough;
///
/// impl Middleware for Passthrough {
///     fn respond<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Outcome> {
///         async move {
///             let outcome = next.run(req).await;
///             // post-process `outcome` here
///             outcome
///         }
///         .boxed()
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn respond<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Outcome>;
}

pub(crate) type BoxedMiddleware = Arc<dyn Middleware>;

/// The remainder of the chain after the current stage.
///
/// [`Next::run`] consumes the handle, so a stage can invoke the rest of the
/// chain at most once.
pub struct Next<'a> {
    stages: &'a [BoxedMiddleware],
    terminal: &'a dyn Responder,
}

impl<'a> Next<'a> {
    pub(crate) fn new(stages: &'a [BoxedMiddleware], terminal: &'a dyn Responder) -> Self {
        Self { stages, terminal }
    }

    pub fn run(self, req: Request) -> BoxFuture<'a, Outcome> {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.respond(req, Next::new(rest, self.terminal)),
            None => self.terminal.respond(req),
        }
    }
}
