//! Domain types, analytics and storage access for monthly water-meter data.
//!
//! The `analytics` module is pure: it borrows a snapshot of records and
//! returns freshly allocated views. Everything that touches storage lives in
//! `db`.

pub mod analytics;
pub mod db;
pub mod domain;

pub use analytics::{
    compute_kpis, default_year, distinct_months, distinct_years, filter_and_summarize,
};
pub use domain::{MonthlyRecord, NewMonthlyRecord};
