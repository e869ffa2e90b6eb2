use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{RecordFilter, RecordStore, StoreError};
use crate::domain::{MonthlyRecord, NewMonthlyRecord};

const RECORD_COLUMNS: &str = "wasser_monat_id, jahr, monat, wasser_zaehlerstand, wasserverbrauch";

/// `RecordStore` backed by the `wasser_monat` table.
///
/// The schema is applied out-of-band via `sql/schema/01_wasser_monat.sql`.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn select_records(filter: RecordFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder =
        QueryBuilder::<Postgres>::new(format!("SELECT {RECORD_COLUMNS} FROM wasser_monat"));

    let mut has_where = false;
    for (column, value) in [("jahr", filter.year), ("monat", filter.month)] {
        if let Some(v) = value {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push(column).push(" = ").push_bind(v);
            has_where = true;
        }
    }

    builder.push(" ORDER BY jahr, monat, wasser_monat_id");
    builder
}

/// The `(jahr, monat)` unique index turns a second insert for a month into
/// a constraint violation.
fn duplicate_or_transport(err: sqlx::Error, new: &NewMonthlyRecord) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate {
            year: new.year,
            month: new.month,
        },
        _ => StoreError::Transport(err),
    }
}

#[async_trait::async_trait]
impl RecordStore for PgRecordStore {
    async fn list_records(&self, filter: RecordFilter) -> Result<Vec<MonthlyRecord>, StoreError> {
        let mut builder = select_records(filter);
        let rows = builder
            .build_query_as::<MonthlyRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn create_record(&self, new: NewMonthlyRecord) -> Result<MonthlyRecord, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO wasser_monat (jahr, monat, wasser_zaehlerstand, wasserverbrauch)
            VALUES ($1, $2, $3, $4)
            RETURNING {RECORD_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, MonthlyRecord>(&sql)
            .bind(new.year)
            .bind(new.month)
            .bind(new.meter_reading)
            .bind(new.consumption)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| duplicate_or_transport(e, &new))?;

        Ok(row)
    }

    async fn update_record(
        &self,
        id: i64,
        meter_reading: f64,
        consumption: f64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE wasser_monat
            SET wasser_zaehlerstand = $1,
                wasserverbrauch = $2
            WHERE wasser_monat_id = $3
            "#,
        )
        .bind(meter_reading)
        .bind(consumption)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}
