//! Table and dashboard derivations over a record snapshot.

mod aggregation;
mod kpi;

pub use aggregation::{
    default_year, distinct_months, distinct_years, filter_and_summarize, MonthOption, SummaryRow,
    TableRow,
};
pub use kpi::{compute_kpis, compute_variation, KpiKind, KpiMetric, Trend, Variation};
