//! Existence-check contract and the reference HTTP prober.
//!
//! The engine only ever talks to [`Probe`], so tests substitute a scripted
//! in-memory prober and the binary plugs in [`HttpProber`].

use crate::types::ProbeOutcome;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, trace};

/// Redirect chain bound applied to every existence check.
const MAX_REDIRECTS: usize = 10;

/// Single logical existence check against one absolute URL.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe `url` once, following redirects up to the configured bound and
    /// applying the per-request timeout and any configured custom headers.
    async fn check(&self, url: &str) -> ProbeOutcome;

    /// Replace the header set applied to subsequent checks. In-flight checks
    /// may complete with the prior snapshot.
    fn set_custom_headers(&self, headers: HashMap<String, String>);
}

/// Reference prober backed by a pooled reqwest client.
pub struct HttpProber {
    client: Client,
    custom_headers: RwLock<HeaderMap>,
}

impl HttpProber {
    /// Build a prober with a fixed per-request timeout. Timeout, redirect
    /// bound, and pool behavior are construction-time configuration.
    pub fn new(timeout_ms: u64) -> crate::types::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent("adfind/0.1")
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            custom_headers: RwLock::new(HeaderMap::new()),
        })
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn check(&self, url: &str) -> ProbeOutcome {
        let headers = self
            .custom_headers
            .read()
            .map(|h| h.clone())
            .unwrap_or_default();

        trace!("probing {}", url);

        match self.client.get(url).headers(headers).send().await {
            Ok(response) => ProbeOutcome::from_status(response.status().as_u16()),
            Err(e) => ProbeOutcome::TransportError {
                error: e.to_string(),
            },
        }
    }

    fn set_custom_headers(&self, headers: HashMap<String, String>) {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    map.insert(name, value);
                }
                _ => debug!("skipping invalid header: {}", name),
            }
        }

        if let Ok(mut guard) = self.custom_headers.write() {
            *guard = map;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_headers_replace_prior_set() {
        let prober = HttpProber::new(1000).unwrap();

        let mut first = HashMap::new();
        first.insert("X-Forwarded-For".to_string(), "127.0.0.1".to_string());
        prober.set_custom_headers(first);

        let mut second = HashMap::new();
        second.insert("Authorization".to_string(), "Bearer token".to_string());
        prober.set_custom_headers(second);

        let snapshot = prober.custom_headers.read().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key("authorization"));
        assert!(!snapshot.contains_key("x-forwarded-for"));
    }

    #[test]
    fn invalid_header_names_are_dropped() {
        let prober = HttpProber::new(1000).unwrap();

        let mut headers = HashMap::new();
        headers.insert("Bad Header Name".to_string(), "value".to_string());
        headers.insert("X-Valid".to_string(), "ok".to_string());
        prober.set_custom_headers(headers);

        let snapshot = prober.custom_headers.read().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key("x-valid"));
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let prober = HttpProber::new(200).unwrap();
        // Reserved TEST-NET-1 address, nothing listens there.
        let outcome = prober.check("http://192.0.2.1:1/admin").await;
        assert!(matches!(outcome, ProbeOutcome::TransportError { .. }));
    }
}
