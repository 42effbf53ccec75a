//! History screen state
//!
//! A [`HistoryCoordinator`] fetches a period's payload through an
//! [`AnalyticsService`](crate::client::AnalyticsService), runs it through the
//! [`analytics`](crate::analytics) pipeline and publishes one [`ViewState`]
//! per completed request on a `tokio::sync::watch` channel.
//!
//! ## Request policy
//!
//! Cancel-and-replace: a new `load` aborts the request in flight, and a
//! superseded request never publishes, even if its response has already
//! arrived. Failures keep the previously loaded data and only set `error`.

mod coordinator;
mod state;

pub use coordinator::HistoryCoordinator;
pub use state::ViewState;
