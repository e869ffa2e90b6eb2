pub mod api;
pub mod backfill;
pub mod config;
pub mod metrics_server;
pub mod observability;
pub mod report;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use api::{router, AppState};
