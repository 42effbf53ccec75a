//! Analytics service client
//!
//! The history coordinator only depends on the [`AnalyticsService`] trait, so
//! tests and alternative transports can stand in for the HTTP client.
//!
//! ## Usage
//!
//! Point the client at the API in `~/.config/fitfuel/config.toml`:
//!
//! ```toml
//! [api]
//! base_url = "https://api.fitfuel.com"
//! token = "your-token"
//! ```

mod api;

pub use api::ApiClient;

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::AnalyticsPayload;

/// Source of historical statistics.
pub trait AnalyticsService: Send + Sync + 'static {
    /// Fetch the payload covering `start..=end`.
    ///
    /// Fails with a transport, decoding or server error.
    fn fetch_historical_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<AnalyticsPayload>> + Send;
}
