//! What a mounted router does after it missed and passed the request on.
//!
//! Once the rest of the chain has answered, there are three ways out:
//!
//! | Downstream | Environment  | Result                                    |
//! |------------|--------------|-------------------------------------------|
//! | `Ok`       | any          | downstream response, routing miss dropped |
//! | `Err`      | development  | `404` with body `Routing <description>`   |
//! | `Err`      | otherwise    | downstream error, unchanged               |
//!
//! In both failure rows the routing error is logged at info level. The
//! downstream error is never logged here; whoever receives it owns it.
//!
//! [`resolve`] makes the decision without side effects. [`recover`] is what
//! both routing middlewares call: decide, log, convert back into an
//! [`Outcome`].

use http::StatusCode;
use tracing::info;

use crate::environment::Environment;
use crate::error::BoxError;
use crate::handler::Outcome;
use crate::parser::RoutingError;
use crate::response::Response;

/// The three terminal states after a routing miss.
#[derive(Debug)]
pub enum Resolution {
    /// The rest of the chain answered. Its response goes out as is.
    Downstream(Response),
    /// The rest of the chain failed outside development. Its error goes out.
    Propagate(BoxError),
    /// The rest of the chain failed in development. The routing error is
    /// rendered instead.
    Diagnostic(Response),
}

impl Resolution {
    fn into_outcome(self) -> Outcome {
        match self {
            Self::Downstream(res) | Self::Diagnostic(res) => Ok(res),
            Self::Propagate(err) => Err(err),
        }
    }
}

/// Decides the outcome of a routing miss given what the rest of the chain
/// produced.
pub fn resolve(
    routing_error: &RoutingError,
    downstream: Outcome,
    environment: Environment,
) -> Resolution {
    match downstream {
        Ok(res) => Resolution::Downstream(res),
        Err(_) if environment.is_development() => Resolution::Diagnostic(diagnostic(routing_error)),
        Err(err) => Resolution::Propagate(err),
    }
}

/// [`resolve`], then log the routing error if the chain failed.
pub fn recover(routing_error: RoutingError, downstream: Outcome, environment: Environment) -> Outcome {
    let resolution = resolve(&routing_error, downstream, environment);
    if !matches!(resolution, Resolution::Downstream(_)) {
        info!("Routing {routing_error}");
    }
    resolution.into_outcome()
}

/// The development-only response: `404`, plain text, `Routing <description>`.
pub fn diagnostic(routing_error: &RoutingError) -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .text(format!("Routing {routing_error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Abort;

    fn miss() -> RoutingError {
        RoutingError::NoMatch { path: "/unknown".to_owned() }
    }

    fn boom() -> BoxError {
        Abort::with_reason(StatusCode::BAD_GATEWAY, "boom").into()
    }

    #[test]
    fn downstream_success_wins_everywhere() {
        for env in [Environment::Development, Environment::Testing, Environment::Production] {
            let res = Response::text("static file");
            match resolve(&miss(), Ok(res), env) {
                Resolution::Downstream(res) => assert_eq!(&res.body()[..], b"static file"),
                other => panic!("expected Downstream, got {other:?}"),
            }
        }
    }

    #[test]
    fn production_propagates_the_downstream_error() {
        match resolve(&miss(), Err(boom()), Environment::Production) {
            Resolution::Propagate(err) => {
                assert_eq!(err.downcast_ref::<Abort>().unwrap().reason(), "boom");
            }
            other => panic!("expected Propagate, got {other:?}"),
        }
    }

    #[test]
    fn testing_behaves_like_production() {
        assert!(matches!(
            resolve(&miss(), Err(boom()), Environment::Testing),
            Resolution::Propagate(_),
        ));
    }

    #[test]
    fn development_renders_the_routing_error() {
        match resolve(&miss(), Err(boom()), Environment::Development) {
            Resolution::Diagnostic(res) => {
                assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
                assert_eq!(&res.body()[..], b"Routing no route matches `/unknown`");
                assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
            }
            other => panic!("expected Diagnostic, got {other:?}"),
        }
    }

    #[test]
    fn recover_converts_back_into_an_outcome() {
        let ok = recover(miss(), Ok(Response::text("ok")), Environment::Production).unwrap();
        assert_eq!(&ok.body()[..], b"ok");

        let err = recover(miss(), Err(boom()), Environment::Production).unwrap_err();
        assert!(err.downcast_ref::<Abort>().is_some());

        let dev = recover(miss(), Err(boom()), Environment::Development).unwrap();
        assert_eq!(dev.status_code(), StatusCode::NOT_FOUND);
    }
}
