//! Middleware binding a request-scoped logger into every request.
//!
//! The layer reads the request's existing [`Context`] extension (or starts
//! from the background context), binds its logger with `request_id`,
//! `method` and `path` fields, and stores the derived context back into the
//! request extensions before calling the inner service.

use std::convert::Infallible;
use std::task::Poll;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Request;
use tower::{Layer, Service};

use crate::binding::set_logger;
use crate::context::Context;
use crate::http::request::request_id;
use crate::logger::{self, Logger};

/// Layer that attaches a logging [`Context`] to each request.
#[derive(Debug, Clone)]
pub struct ContextLayer {
    logger: Logger,
}

impl ContextLayer {
    /// Bind children of `logger` into requests.
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl Default for ContextLayer {
    fn default() -> Self {
        Self::new(logger::new(o!()))
    }
}

impl<S> Layer<S> for ContextLayer {
    type Service = ContextService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ContextService {
            inner,
            logger: self.logger.clone(),
        }
    }
}

/// Service produced by [`ContextLayer`].
#[derive(Debug, Clone)]
pub struct ContextService<S> {
    inner: S,
    logger: Logger,
}

impl<S, B> Service<Request<B>> for ContextService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let parent = req.extensions().get::<Context>().cloned().unwrap_or_default();
        let ctx = set_logger(
            &parent,
            &self.logger,
            o!(
                "request_id" => request_id(&req),
                "method" => req.method().to_string(),
                "path" => req.uri().path().to_string(),
            ),
        );
        req.extensions_mut().insert(ctx);
        self.inner.call(req)
    }
}

/// Extracts the request [`Context`]; the background context when no
/// [`ContextLayer`] ran.
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Context>().cloned().unwrap_or_default())
    }
}
