//! # astor-routing
//!
//! Mount typed route parsers into an HTTP middleware pipeline.
//!
//! ## The contract
//!
//! A router here is a parser: it turns a request into a value of *your* route
//! type, or explains why it could not. Mounting a router puts it in the
//! pipeline as one stage:
//!
//! - the router matches → your handler gets the typed route and answers;
//! - the router misses → the request continues down the chain, untouched;
//! - the router misses *and* the rest of the chain fails → the routing error
//!   is logged, and in development it is shown in a `404` body
//!   (`Routing <description>`). Elsewhere the downstream error goes out as is.
//!
//! Handler errors are the handler's business. They leave the pipeline
//! exactly as they were raised.
//!
//! What's in the box:
//!
//! - [`RequestData`]: the canonical, decoded view route parsers see
//! - [`RouteParser`]: the parser contract, with a radix-tree [`Router`] built
//!   on [`matchit`]
//! - [`App::mount`] and [`App::mount_future`]: the same routing protocol for
//!   `async`/`await` handlers and for handlers that return composed futures
//! - [`Server`]: hyper, HTTP/1.1 + HTTP/2, graceful shutdown on SIGTERM / Ctrl-C
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use astor_routing::{App, BoxError, Environment, Request, Response, Router, Server};
//! use http::Method;
//!
//! enum Route {
//!     User { id: u64 },
//!     CreateUser,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BoxError> {
//!     let router = Router::new()
//!         .on(Method::GET,  "/users/{id}", |m| Ok(Route::User { id: m.parse("id")? }))
//!         .on(Method::POST, "/users",      |_| Ok(Route::CreateUser));
//!
//!     let app = App::new(Environment::detect()?).mount(router, handle);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await?;
//!     Ok(())
//! }
//!
//! async fn handle(_req: Request, route: Route) -> Result<Response, BoxError> {
//!     Ok(match route {
//!         Route::User { id } => Response::json(format!(r#"{{"id":{id}}}"#)),
//!         Route::CreateUser  => Response::text("created"),
//!     })
//! }
//! ```

mod app;
mod environment;
mod error;
mod handler;
mod parser;
mod request;
mod request_data;
mod response;
mod router;
mod server;

pub mod middleware;

pub use app::App;
pub use environment::{ENV_VAR, Environment};
pub use error::{Abort, BoxError, Error};
pub use handler::{FutureHandler, Handler, NotFound, Outcome, Responder};
pub use parser::{RouteParser, RoutingError};
pub use request::Request;
pub use request_data::RequestData;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::{Match, Router};
pub use server::Server;
