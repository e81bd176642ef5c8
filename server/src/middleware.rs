//! HTTP middleware for Axum.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, Request, Response};
use tower::{Layer, Service};

use super::metrics::{HttpLabels, HttpLabelsWithStatus, HttpMethod, Metrics};

/// Gauge guard for one in-flight request.
///
/// Increments the gauge on creation and decrements it on drop, so a request
/// releases its slot whether it completes, fails, or is cancelled mid-way.
struct InFlightGuard {
    metrics: Arc<Metrics>,
}

impl InFlightGuard {
    fn track(metrics: &Arc<Metrics>) -> Self {
        metrics.http_requests_in_flight.inc();
        Self {
            metrics: metrics.clone(),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.metrics.http_requests_in_flight.dec();
    }
}

/// Tower layer recording request counts, latencies, and the in-flight
/// gauge.
#[derive(Clone)]
pub struct MetricsLayer {
    metrics: Arc<Metrics>,
}

impl MetricsLayer {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            metrics: self.metrics.clone(),
        }
    }
}

/// Middleware service behind [`MetricsLayer`].
#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
    metrics: Arc<Metrics>,
}

impl<S, ResBody> Service<Request<Body>> for MetricsService<S>
where
    S: Service<Request<Body>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ResBody: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let labels = HttpLabels {
            method: HttpMethod::from(request.method()),
            endpoint: normalize_endpoint(request.uri().path()),
        };
        let metrics = self.metrics.clone();
        let guard = InFlightGuard::track(&metrics);
        let started = Instant::now();
        let future = self.inner.call(request);

        Box::pin(async move {
            // Held until the inner future resolves or is dropped.
            let _guard = guard;
            let response = future.await?;

            metrics
                .http_request_duration_seconds
                .get_or_create(&labels)
                .observe(started.elapsed().as_secs_f64());

            let HttpLabels { method, endpoint } = labels;
            metrics
                .http_requests_total
                .get_or_create(&HttpLabelsWithStatus {
                    method,
                    endpoint,
                    status: response.status().as_u16(),
                })
                .inc();

            Ok(response)
        })
    }
}

/// Collapses request paths into a small set of endpoint label values.
///
/// Namespace and key segments become route placeholders, so each route
/// maps to a single label value no matter what callers store.
fn normalize_endpoint(path: &str) -> String {
    if path == "/" || path == "/metrics" || path.starts_with("/-/") {
        return path.to_string();
    }
    match path.trim_matches('/').split('/').count() {
        1 => "/:namespace".to_string(),
        2 => "/:namespace/:key".to_string(),
        _ => "/unmatched".to_string(),
    }
}

/// Tower layer logging one line per request and one per response at debug
/// level.
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Middleware service behind [`TracingLayer`].
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S, ResBody> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ResBody: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        tracing::debug!(%method, %uri, %user_agent, "Received request");

        let started = Instant::now();
        let future = self.inner.call(request);

        Box::pin(async move {
            let response = future.await?;

            tracing::debug!(
                %method,
                %uri,
                status = response.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Completed request"
            );

            Ok(response)
        })
    }
}
