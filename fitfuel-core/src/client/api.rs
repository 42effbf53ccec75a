//! HTTP client for the FitFuel statistics API

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::AnalyticsPayload;

use super::AnalyticsService;

/// Date format the API expects in query parameters
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// HTTP client for the statistics endpoints
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Config(format!("invalid api.token: {}", e)))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL requests are sent to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the API is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        match self.http_client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn get_history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AnalyticsPayload> {
        let url = format!("{}/statistics/history", self.base_url);
        let start_date = start.format(QUERY_DATE_FORMAT).to_string();
        let end_date = end.format(QUERY_DATE_FORMAT).to_string();

        tracing::debug!(%url, %start_date, %end_date, "Fetching historical data");

        let response = self
            .http_client
            .get(&url)
            .query(&[("startDate", &start_date), ("endDate", &end_date)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Server {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl AnalyticsService for ApiClient {
    async fn fetch_historical_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AnalyticsPayload> {
        self.get_history(start, end).await
    }
}

fn transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Transport(format!("request timed out: {}", error))
    } else {
        Error::Transport(format!("HTTP request failed: {}", error))
    }
}
