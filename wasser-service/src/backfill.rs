use std::io::Read;

use csv::StringRecord;
use wasser_client::{db::RecordStore, NewMonthlyRecord};

use crate::{
    api::dto::{parse_integer_str, parse_quantity_str, IncomingRecord},
    validation::{validate_new_record, ValidationError},
};

/// CSV backfill for monthly records.
///
/// Expected header columns (by name):
/// - jahr
/// - monat
/// - wasser_zaehlerstand
/// - wasserverbrauch
#[derive(thiserror::Error, Debug)]
pub enum BackfillError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column '{0}' in CSV header")]
    MissingColumn(&'static str),
    #[error("line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: ValidationError,
    },
}

const COLUMNS: [&str; 4] = ["jahr", "monat", "wasser_zaehlerstand", "wasserverbrauch"];

fn column_positions(headers: &StringRecord) -> Result<[usize; 4], BackfillError> {
    let mut positions = [0; 4];
    for (slot, name) in positions.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or(BackfillError::MissingColumn(name))?;
    }
    Ok(positions)
}

fn record_to_incoming(record: &StringRecord, positions: &[usize; 4]) -> IncomingRecord {
    let field = |idx: usize| record.get(positions[idx]).unwrap_or("");

    IncomingRecord {
        year: parse_integer_str(field(0)),
        month: parse_integer_str(field(1)),
        meter_reading: parse_quantity_str(field(2)),
        consumption: parse_quantity_str(field(3)),
    }
}

pub type ParsedRow = Result<NewMonthlyRecord, BackfillError>;

/// Outcome counts of one [`load`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BackfillSummary {
    pub inserted: usize,
    /// Rows that failed parsing or validation.
    pub skipped: usize,
    /// Valid rows the store refused, duplicates included.
    pub failed: usize,
}

/// Parse every data row. Header problems fail the whole read; a bad row only
/// fails its own entry.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ParsedRow>, BackfillError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let positions = column_positions(rdr.headers()?)?;

    let rows = rdr
        .records()
        .map(|result| {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            validate_new_record(record_to_incoming(&record, &positions))
                .map_err(|source| BackfillError::InvalidRow { line, source })
        })
        .collect();

    Ok(rows)
}

/// Insert every valid row. Neither a bad row nor a store error stops the
/// run; both are logged and counted.
pub async fn load(store: &dyn RecordStore, rows: Vec<ParsedRow>) -> BackfillSummary {
    let mut summary = BackfillSummary::default();

    for row in rows {
        let new = match row {
            Ok(new) => new,
            Err(e) => {
                tracing::warn!(error = %e, "skipping invalid backfill row");
                summary.skipped += 1;
                continue;
            }
        };

        let (jahr, monat) = (new.year, new.month);
        match store.create_record(new).await {
            Ok(_) => summary.inserted += 1,
            Err(e) => {
                tracing::warn!(error = %e, jahr, monat, "store rejected backfill row");
                metrics::counter!("store_errors_total").increment(1);
                summary.failed += 1;
            }
        }
    }

    summary
}
