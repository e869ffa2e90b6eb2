use anyhow::{anyhow, Result};
use std::env;
use wasser_client::{
    analytics::{compute_kpis, default_year, filter_and_summarize},
    db::RecordFilter,
};
use wasser_service::{config::AppConfig, observability, report, store};

fn parse_arg(arg: Option<String>, name: &str) -> Result<Option<i32>> {
    arg.map(|a| a.parse::<i32>().map_err(|e| anyhow!("invalid {name} '{a}': {e}")))
        .transpose()
}

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let mut args = env::args().skip(1);
    let jahr = parse_arg(args.next(), "jahr")?;
    let monat = parse_arg(args.next(), "monat")?;

    let cfg = AppConfig::load()?;
    let store = store::connect(&cfg).await?;

    let records = store.list_records(RecordFilter::all()).await?;
    let Some(year) = jahr.or_else(|| default_year(&records)) else {
        tracing::info!("no records stored; nothing to report");
        return Ok(());
    };

    println!("Wasser Monatsdaten {year}");
    println!("{}", report::render_table(&filter_and_summarize(&records, year, monat)));
    println!("{}", report::render_kpis(&compute_kpis(&records, year)));

    tracing::info!(year, records = records.len(), "report rendered");

    Ok(())
}
