use wasser_client::{
    db::{InMemoryRecordStore, RecordFilter, RecordStore, StoreError},
    MonthlyRecord, NewMonthlyRecord,
};

/// In-memory store that can be told to lose its connection, either for every
/// call or only for writes touching one month.
#[derive(Default)]
pub struct UnreliableStore {
    inner: InMemoryRecordStore,
    down: bool,
    failing_month: Option<i32>,
}

impl UnreliableStore {
    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn failing_month(month: i32) -> Self {
        Self {
            failing_month: Some(month),
            ..Self::default()
        }
    }

    fn check(&self, month: Option<i32>) -> Result<(), StoreError> {
        if self.down || (month.is_some() && month == self.failing_month) {
            return Err(StoreError::Transport(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for UnreliableStore {
    async fn list_records(&self, filter: RecordFilter) -> Result<Vec<MonthlyRecord>, StoreError> {
        self.check(None)?;
        self.inner.list_records(filter).await
    }

    async fn create_record(&self, new: NewMonthlyRecord) -> Result<MonthlyRecord, StoreError> {
        self.check(Some(new.month))?;
        self.inner.create_record(new).await
    }

    async fn update_record(
        &self,
        id: i64,
        meter_reading: f64,
        consumption: f64,
    ) -> Result<(), StoreError> {
        self.check(None)?;
        self.inner.update_record(id, meter_reading, consumption).await
    }
}
