//! HTTP request/response tracing middleware.

use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a span at `INFO` level with:
///   - HTTP method
///   - URI path
///   - `site`: the first path segment as sent, i.e. the host or page URL a
///     reaction is addressed to (empty for `/`)
///
/// **On Response:**
/// - Logs at `INFO` level with:
///   - Status code
///   - Latency in milliseconds
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/example.com site=example.com}: finished processing request latency=3 ms status=201
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, ReactionSpan> {
    TraceLayer::new_for_http()
        .make_span_with(ReactionSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Request span carrying the addressed site.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactionSpan;

impl<B> MakeSpan<B> for ReactionSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            site = site_segment(request.uri().path()),
        )
    }
}

fn site_segment(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_segment() {
        assert_eq!(site_segment("/example.com"), "example.com");
        assert_eq!(site_segment("/example.com/%F0%9F%98%80"), "example.com");
        assert_eq!(
            site_segment("/https%3A%2F%2Fexample.com%2Fpost"),
            "https%3A%2F%2Fexample.com%2Fpost"
        );
        assert_eq!(site_segment("/"), "");
    }

    #[test]
    fn test_make_span_accepts_any_body() {
        let request = Request::builder()
            .uri("/example.com")
            .body(())
            .unwrap();

        let _span = ReactionSpan.make_span(&request);
    }
}
