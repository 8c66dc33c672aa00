//! Blocking HTTP access for the lookup services.
//!
//! [`ReqwestClient`] drives the async `reqwest` client on a private current-thread
//! `tokio` runtime, so the rest of the crate stays synchronous. It must not be
//! called from inside another tokio runtime.

use std::time::Duration;

use reqwest::Response;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::ServiceError;
use crate::constants::USER_AGENT;

/// Minimal HTTP surface needed by the services, so they can be tested against fakes.
pub trait HttpClient {
    /// GET `url` with the given query parameters and return the body as text.
    fn get_text(
        &self,
        url: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<String, ServiceError>;

    /// GET `url` and decode the body as JSON.
    fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Value, ServiceError> {
        let body = self.get_text(url, params, timeout)?;
        serde_json::from_str(&body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}

pub struct ReqwestClient {
    client: reqwest::Client,
    runtime: Runtime,
}

impl ReqwestClient {
    /// Create a client with the azely user agent and its own runtime.
    ///
    /// Timeouts are set per request, see [`HttpClient::get_text`].
    pub fn new() -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ServiceError::Runtime)?;

        Ok(ReqwestClient { client, runtime })
    }

    async fn fetch(
        &self,
        url: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Response, ServiceError> {
        debug!(url, ?params, "HTTP GET");

        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

impl HttpClient for ReqwestClient {
    fn get_text(
        &self,
        url: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<String, ServiceError> {
        self.runtime.block_on(async {
            let response = self.fetch(url, params, timeout).await?;
            response.text().await.map_err(|e| classify(e, timeout))
        })
    }

    fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Value, ServiceError> {
        self.runtime.block_on(async {
            let response = self.fetch(url, params, timeout).await?;
            response.json::<Value>().await.map_err(|e| {
                if e.is_decode() {
                    ServiceError::InvalidResponse(e.to_string())
                } else {
                    classify(e, timeout)
                }
            })
        })
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout(timeout)
    } else {
        ServiceError::Http(err)
    }
}
