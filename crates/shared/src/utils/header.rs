use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::Injector;

/// Writes W3C trace-context entries into the header map of an outbound
/// HTTP request so spans continue across the service boundary.
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = HeaderName::from_bytes(key.as_bytes())
            && let Ok(value) = HeaderValue::from_str(&value)
        {
            self.0.insert(name, value);
        }
    }
}
