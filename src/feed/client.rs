// src/feed/client.rs
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde_json::Value;

use crate::feed::error::FeedError;

/// Single HTTP GET against a templated endpoint, returning parsed JSON.
/// No internal retry; the next scheduled refresh tick is the retry.
/// Behind a trait so controller tests can stub the network entirely.
#[async_trait]
pub trait FetchClient: Send + Sync {
    async fn fetch_json(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value, FeedError>;
}

pub struct HttpFetchClient {
    client: reqwest::Client,
}

impl HttpFetchClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    async fn fetch_json(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value, FeedError> {
        let t0 = std::time::Instant::now();

        let resp = match self.client.get(endpoint).query(params).send().await {
            Ok(resp) => resp,
            Err(e) => {
                counter!("feed_fetch_errors_total").increment(1);
                return Err(FeedError::Network {
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                });
            }
        };

        let status = resp.status();
        if !status.is_success() {
            counter!("feed_fetch_errors_total").increment(1);
            return Err(FeedError::Network {
                status: Some(status.as_u16()),
                message: format!("HTTP {status}"),
            });
        }

        let value = resp.json::<Value>().await.map_err(|e| {
            counter!("feed_fetch_errors_total").increment(1);
            FeedError::Parse {
                message: e.to_string(),
            }
        })?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_fetch_ms").record(ms);
        Ok(value)
    }
}
