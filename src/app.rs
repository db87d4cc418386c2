//! The request pipeline.
//!
//! An [`App`] is an ordered list of stages ending in a [`Responder`]. Routers
//! are mounted as stages; other middleware can sit before, between or after
//! them. Requests walk the list front to back until something answers.

use std::sync::Arc;

use crate::environment::Environment;
use crate::error::Error;
use crate::handler::{FutureHandler, Handler, NotFound, Outcome, Responder};
use crate::middleware::{BoxedMiddleware, FutureRoutingMiddleware, Middleware, Next, RoutingMiddleware};
use crate::parser::RouteParser;
use crate::request::Request;

/// The application: environment, stages, and what answers when nothing else
/// does.
///
/// ```rust
/// use astor_routing::{App, Environment, Request, Response, Router};
/// use http::Method;
/// use std::convert::Infallible;
///
/// enum Api { User(u64) }
///
/// let api = Router::new()
///     .on(Method::GET, "/users/{id}", |m| Ok(Api::User(m.parse("id")?)));
///
/// let app = App::new(Environment::Production)
///     .mount(api, |_req: Request, route: Api| async move {
///         let Api::User(id) = route;
///         Ok::<_, Infallible>(Response::text(format!("user {id}")))
///     });
/// ```
pub struct App {
    environment: Environment,
    stages: Vec<BoxedMiddleware>,
    terminal: Arc<dyn Responder>,
}

impl App {
    /// An empty pipeline that ends in [`NotFound`].
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            stages: Vec::new(),
            terminal: Arc::new(NotFound),
        }
    }

    /// [`App::new`] with the environment read from `ASTOR_ENV`.
    pub fn detect() -> Result<Self, Error> {
        Ok(Self::new(Environment::detect()?))
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Mounts `parser` with a handler that is awaited directly.
    ///
    /// The stage is appended after everything mounted so far. Requests the
    /// parser accepts go to `handler`; anything else continues down the
    /// chain. This is the mount to reach for unless your handlers already
    /// return composed futures.
    pub fn mount<P, H>(self, parser: P, handler: H) -> Self
    where
        P: RouteParser,
        H: Handler<P::Route>,
    {
        let environment = self.environment;
        self.middleware(RoutingMiddleware::new(parser, handler, environment))
    }

    /// Mounts `parser` with a handler that returns a future value, chained
    /// with combinators instead of awaited. Routing and fallback behave
    /// exactly as with [`App::mount`].
    pub fn mount_future<P, H>(self, parser: P, handler: H) -> Self
    where
        P: RouteParser,
        H: FutureHandler<P::Route>,
    {
        let environment = self.environment;
        self.middleware(FutureRoutingMiddleware::new(parser, handler, environment))
    }

    /// Appends any other stage.
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Replaces the end of the chain.
    pub fn fallback(mut self, responder: impl Responder) -> Self {
        self.terminal = Arc::new(responder);
        self
    }

    /// Runs one request through the whole pipeline.
    pub async fn handle(&self, req: Request) -> Outcome {
        Next::new(&self.stages, self.terminal.as_ref()).run(req).await
    }
}
