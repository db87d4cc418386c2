//! Route handlers and terminal responders.
//!
//! # Two handler shapes
//!
//! A mounted router hands its parsed route to a handler. Handlers come in two
//! flavours that match the two ways of mounting:
//!
//! ```text
//! async fn show(req: Request, route: Route) -> Result<Response, E>    ← Handler<Route>
//!        ↓ app.mount(router, show)
//! RoutingMiddleware awaits it directly
//!
//! fn show(req: Request, route: Route) -> BoxFuture<Result<T, E>>      ← FutureHandler<Route>
//!        ↓ app.mount_future(router, show)
//! FutureRoutingMiddleware chains it with combinators
//! ```
//!
//! Both are satisfied by blanket impls and sealed, so there is nothing to
//! implement by hand. Handler errors are never caught by the router: they
//! travel out of the pipeline as the boxed error they were.
//!
//! # Responders
//!
//! A [`Responder`] sits at the very end of the chain and answers whatever no
//! stage claimed. The default is [`NotFound`], which fails with a `404`
//! [`Abort`].

use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt, TryFuture};

use crate::error::{Abort, BoxError};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// What every stage of the pipeline produces.
pub type Outcome = Result<Response, BoxError>;

// ── Handler (direct suspension) ───────────────────────────────────────────────

/// A route handler awaited directly.
///
/// Satisfied by any `async fn(Request, R) -> Result<T, E>` (or closure
/// returning such a future) where `T: IntoResponse` and `E` converts into a
/// [`BoxError`].
pub trait Handler<R>: private::Sealed<R> + Send + Sync + 'static {
    type Output: IntoResponse;
    type Error: Into<BoxError>;
    type Future: Future<Output = Result<Self::Output, Self::Error>> + Send + 'static;

    fn call(&self, req: Request, route: R) -> Self::Future;
}

impl<F, Fut, T, E, R> private::Sealed<R> for F
where
    F: Fn(Request, R) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
}

impl<F, Fut, T, E, R> Handler<R> for F
where
    F: Fn(Request, R) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: IntoResponse,
    E: Into<BoxError>,
{
    type Output = T;
    type Error = E;
    type Future = Fut;

    fn call(&self, req: Request, route: R) -> Fut {
        self(req, route)
    }
}

// ── FutureHandler (combinators) ───────────────────────────────────────────────

/// A route handler that hands back a future value to be chained.
///
/// Satisfied by any `Fn(Request, R)` returning a [`TryFuture`], typically a
/// [`BoxFuture`] built with `futures_util` combinators.
pub trait FutureHandler<R>: private::SealedFuture<R> + Send + Sync + 'static {
    type Output: IntoResponse;
    type Error: Into<BoxError>;
    type Future: TryFuture<Ok = Self::Output, Error = Self::Error> + Send + 'static;

    fn call(&self, req: Request, route: R) -> Self::Future;
}

impl<F, Fut, R> private::SealedFuture<R> for F
where
    F: Fn(Request, R) -> Fut + Send + Sync + 'static,
    Fut: TryFuture + Send + 'static,
{
}

impl<F, Fut, R> FutureHandler<R> for F
where
    F: Fn(Request, R) -> Fut + Send + Sync + 'static,
    Fut: TryFuture + Send + 'static,
    Fut::Ok: IntoResponse,
    Fut::Error: Into<BoxError>,
{
    type Output = Fut::Ok;
    type Error = Fut::Error;
    type Future = Fut;

    fn call(&self, req: Request, route: R) -> Fut {
        self(req, route)
    }
}

/// Because the sealing traits are private, external crates cannot implement
/// the handler traits on their own types.
mod private {
    pub trait Sealed<R> {}
    pub trait SealedFuture<R> {}
}

// ── Responder ─────────────────────────────────────────────────────────────────

/// The end of the pipeline: answers requests no stage claimed.
///
/// Implemented for every `Fn(Request) -> impl Future<Output = Result<T, E>>`,
/// and for [`NotFound`].
pub trait Responder: Send + Sync + 'static {
    fn respond(&self, req: Request) -> BoxFuture<'_, Outcome>;
}

impl<F, Fut, T, E> Responder for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: IntoResponse,
    E: Into<BoxError>,
{
    fn respond(&self, req: Request) -> BoxFuture<'_, Outcome> {
        let fut = self(req);
        async move { fut.await.map(IntoResponse::into_response).map_err(Into::<BoxError>::into) }.boxed()
    }
}

/// Default end of the chain. Always fails with [`Abort::not_found`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NotFound;

impl Responder for NotFound {
    fn respond(&self, _req: Request) -> BoxFuture<'_, Outcome> {
        let outcome: Outcome = Err(Abort::not_found().into());
        futures_util::future::ready(outcome).boxed()
    }
}
