//! # fitfuel-core
//!
//! Core library for the FitFuel history screen: turns the statistics API's
//! historical payload into an observable, UI-ready view-state.
//!
//! This library provides:
//! - Payload and period types
//! - The analytics pipeline (trends, insights, monthly stats formatting)
//! - An HTTP client for the statistics API
//! - The history coordinator that fetches, transforms and publishes state
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitfuel_core::client::ApiClient;
//! use fitfuel_core::history::HistoryCoordinator;
//! use fitfuel_core::{Config, TimePeriod};
//!
//! # async fn run() -> fitfuel_core::Result<()> {
//! let config = Config::load()?;
//! let client = ApiClient::new(&config.api)?;
//!
//! let history = HistoryCoordinator::new(client, config.history.default_period);
//! history.load(TimePeriod::Month);
//! let state = history.wait_idle().await;
//! println!("compliance: {:.1}%", state.average_compliance);
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod history;
pub mod logging;
pub mod types;
