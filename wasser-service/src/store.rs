use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use wasser_client::db::{InMemoryRecordStore, PgRecordStore, RecordStore};

use crate::config::{AppConfig, StoreKind};

/// Build the record store selected by `store.kind`.
pub async fn connect(cfg: &AppConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    match cfg.store.kind {
        StoreKind::Memory => {
            tracing::warn!("using in-memory record store; records are lost on shutdown");
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
        StoreKind::Postgres => {
            let db = cfg.database.as_ref().ok_or_else(|| {
                anyhow::anyhow!("store.kind = \"postgres\" requires a [database] section")
            })?;

            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect(&db.uri)
                .await?;

            tracing::info!(
                max_connections = db.max_connections,
                "connected to postgres record store"
            );
            Ok(Arc::new(PgRecordStore::new(pool)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn postgres_without_database_section_fails_fast() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [http]
            bind_addr = "127.0.0.1:5000"
            "#,
        )
        .unwrap();

        let err = connect(&cfg).await.err().expect("missing database section");
        assert!(err.to_string().contains("[database]"));
    }

    #[tokio::test]
    async fn memory_store_starts_empty() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [store]
            kind = "memory"

            [http]
            bind_addr = "127.0.0.1:5000"
            "#,
        )
        .unwrap();

        let store = connect(&cfg).await.unwrap();
        let rows = store
            .list_records(wasser_client::db::RecordFilter::all())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
