//! Minimal astor-routing demo: two mounted routers and a static fallback.
//!
//! Run with:
//!   RUST_LOG=info ASTOR_ENV=development cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'
//!   curl http://localhost:3000/healthz
//!   curl -X DELETE http://localhost:3000/users      # routing diagnostic in development
//!   ASTOR_ENV=production cargo run --example basic   # plain 404 instead

use std::convert::Infallible;

use astor_routing::{Abort, App, BoxError, ContentType, Request, Response, Router, Server};
use futures_util::future::{self, BoxFuture, FutureExt};
use http::{Method, StatusCode};

enum Api {
    GetUser { id: u64 },
    CreateUser,
    DeleteUser { id: u64 },
}

enum Probe {
    Liveness,
    Readiness,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();

    let api = Router::new()
        .on(Method::GET,    "/users/{id}", |m| Ok(Api::GetUser { id: m.parse("id")? }))
        .on(Method::POST,   "/users",      |_| Ok(Api::CreateUser))
        .on(Method::DELETE, "/users/{id}", |m| Ok(Api::DeleteUser { id: m.parse("id")? }));

    let probes = Router::new()
        .on(Method::GET, "/healthz", |_| Ok(Probe::Liveness))
        .on(Method::GET, "/readyz",  |_| Ok(Probe::Readiness));

    let app = App::detect()?
        .mount(api, api_handler)
        .mount_future(probes, probe_handler)
        .fallback(static_files);

    Server::bind("0.0.0.0:3000").serve(app).await?;
    Ok(())
}

async fn api_handler(req: Request, route: Api) -> Result<Response, BoxError> {
    Ok(match route {
        Api::GetUser { id } => Response::json(format!(r#"{{"id":{id},"name":"alice"}}"#)),
        Api::CreateUser => {
            if req.body().is_empty() {
                return Err(Abort::with_reason(StatusCode::BAD_REQUEST, "empty body").into());
            }
            Response::builder()
                .status(StatusCode::CREATED)
                .header("location", "/users/99")
                .bytes(ContentType::Json, r#"{"id":99,"name":"new_user"}"#)
        }
        Api::DeleteUser { id } => {
            tracing::info!(id, "deleting user");
            Response::status(StatusCode::NO_CONTENT)
        }
    })
}

fn probe_handler(_req: Request, probe: Probe) -> BoxFuture<'static, Result<&'static str, Infallible>> {
    let body = match probe {
        Probe::Liveness => "ok",
        Probe::Readiness => "ready",
    };
    future::ok(body).boxed()
}

async fn static_files(req: Request) -> Result<Response, Abort> {
    match req.path() {
        "/" => Ok(Response::builder()
            .bytes(ContentType::Html, "<h1>astor</h1>")),
        _ => Err(Abort::not_found()),
    }
}
