//! CORS Headers
//!
//! Every response carries the same fixed CORS header set, errors and
//! preflights included.

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

const ALLOW_METHODS: &str = "GET, HEAD, PUT, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

// == CORS Headers ==
/// Pre-built CORS header values.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    max_age: HeaderValue,
}

impl CorsHeaders {
    /// Builds the header set for `origin` and a preflight `max_age` in seconds.
    ///
    /// An origin that is not a valid header value falls back to `*`.
    pub fn new(origin: &str, max_age: u64) -> Self {
        let allow_origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
            warn!("Invalid CORS origin {:?}, using *", origin);
            HeaderValue::from_static("*")
        });

        Self {
            allow_origin,
            max_age: HeaderValue::from(max_age),
        }
    }

    /// Header name/value pairs in the order they are applied.
    pub fn headers(&self) -> [(HeaderName, HeaderValue); 5] {
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone()),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            ),
            (header::ACCESS_CONTROL_MAX_AGE, self.max_age.clone()),
        ]
    }

    /// Wraps `router` so every response gets the header set, overriding
    /// values set by handlers.
    pub fn layer<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(name, value))
            })
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self::new("*", 86400)
    }
}
