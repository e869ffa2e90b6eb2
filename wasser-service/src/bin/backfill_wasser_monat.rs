use anyhow::{bail, Result};
use std::{env, fs::File};
use wasser_service::{backfill, config::AppConfig, observability, store};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: backfill_wasser_monat <csv_file_path>");
    }
    let file_path = &args[1];

    // Load configuration (can point WASSER_CONFIG to a backfill-specific file).
    let cfg = AppConfig::load()?;
    let store = store::connect(&cfg).await?;

    let rows = backfill::read_records(File::open(file_path)?)?;
    let summary = backfill::load(store.as_ref(), rows).await;

    tracing::info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        failed = summary.failed,
        file = %file_path,
        "wasser_monat backfill finished"
    );

    Ok(())
}
