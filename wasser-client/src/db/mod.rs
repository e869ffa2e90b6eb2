mod memory;
mod wasser_monat_queries;

pub use memory::InMemoryRecordStore;
pub use wasser_monat_queries::PgRecordStore;

use crate::domain::{MonthlyRecord, NewMonthlyRecord};

/// Optional storage-side narrowing. The empty filter returns every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &MonthlyRecord) -> bool {
        self.year.map_or(true, |y| record.year == y)
            && self.month.map_or(true, |m| record.month == m)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(i64),
    #[error("a record for {month}/{year} already exists")]
    Duplicate { year: i32, month: i32 },
    #[error("storage transport error: {0}")]
    Transport(#[from] sqlx::Error),
}

/// Read/create/update access to the monthly records.
///
/// At most one record exists per (year, month).
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Records matching `filter`, ordered by year then month.
    async fn list_records(&self, filter: RecordFilter) -> Result<Vec<MonthlyRecord>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] if the (year, month) slot is taken.
    async fn create_record(&self, new: NewMonthlyRecord) -> Result<MonthlyRecord, StoreError>;

    /// Overwrite the quantities of record `id`. Fails with
    /// [`StoreError::NotFound`] if no such record exists.
    async fn update_record(
        &self,
        id: i64,
        meter_reading: f64,
        consumption: f64,
    ) -> Result<(), StoreError>;
}
