use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::{RecordFilter, RecordStore, StoreError};
use crate::domain::{MonthlyRecord, NewMonthlyRecord};

/// Process-local `RecordStore`. Ids are assigned from 1 upwards.
#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    records: BTreeMap<i64, MonthlyRecord>,
}

impl Inner {
    fn insert(&mut self, new: NewMonthlyRecord) -> Result<MonthlyRecord, StoreError> {
        let taken = self
            .records
            .values()
            .any(|r| r.year == new.year && r.month == new.month);
        if taken {
            return Err(StoreError::Duplicate {
                year: new.year,
                month: new.month,
            });
        }

        self.last_id += 1;
        let record = new.into_record(self.last_id);
        self.records.insert(self.last_id, record.clone());
        Ok(record)
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store. A record whose (year, month) is already taken is
    /// dropped, as a second `create_record` for it would be.
    pub fn with_records(records: impl IntoIterator<Item = NewMonthlyRecord>) -> Self {
        let mut inner = Inner::default();
        for new in records {
            let _ = inner.insert(new);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_records(&self, filter: RecordFilter) -> Result<Vec<MonthlyRecord>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<MonthlyRecord> = inner
            .records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.year, r.month, r.id));
        Ok(rows)
    }

    async fn create_record(&self, new: NewMonthlyRecord) -> Result<MonthlyRecord, StoreError> {
        self.inner.write().await.insert(new)
    }

    async fn update_record(
        &self,
        id: i64,
        meter_reading: f64,
        consumption: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.meter_reading = Some(meter_reading);
        record.consumption = Some(consumption);
        Ok(())
    }
}
