use wasser_client::{db::RecordFilter, NewMonthlyRecord};

use crate::api::dto::{parse_integer_str, IncomingRecord, IncomingUpdate, RecordQuery};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(i32),
    #[error("year {0} is outside 1900..=2100")]
    YearOutOfRange(i32),
    #[error("filter '{name}' must be a whole number, got '{value}'")]
    InvalidFilter { name: &'static str, value: String },
}

/// Pure validation of a create request.
///
/// Rules:
/// - all four fields must be present.
/// - month must be within 1..=12.
/// - year must be within a broad sanity window [1900, 2100].
pub fn validate_new_record(incoming: IncomingRecord) -> Result<NewMonthlyRecord, ValidationError> {
    let year = incoming.year.ok_or(ValidationError::MissingField("Jahr"))?;
    let month = incoming.month.ok_or(ValidationError::MissingField("Monat"))?;
    let meter_reading = incoming
        .meter_reading
        .ok_or(ValidationError::MissingField("Wasser-Zählerstand"))?;
    let consumption = incoming
        .consumption
        .ok_or(ValidationError::MissingField("Wasserverbrauch"))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange(month));
    }

    Ok(NewMonthlyRecord {
        year,
        month,
        meter_reading,
        consumption,
    })
}

/// Pure validation of an update request; returns `(meter_reading, consumption)`.
pub fn validate_update(incoming: IncomingUpdate) -> Result<(f64, f64), ValidationError> {
    let meter_reading = incoming
        .meter_reading
        .ok_or(ValidationError::MissingField("Wasser-Zählerstand"))?;
    let consumption = incoming
        .consumption
        .ok_or(ValidationError::MissingField("Wasserverbrauch"))?;
    Ok((meter_reading, consumption))
}

/// Turn the `jahr`/`monat` query parameters into a store filter.
///
/// An absent or blank parameter does not filter. Anything else has to be an
/// integer, so a typo never silently widens the result to every record.
pub fn validate_query(query: &RecordQuery) -> Result<RecordFilter, ValidationError> {
    Ok(RecordFilter {
        year: filter_value("jahr", query.jahr.as_deref())?,
        month: filter_value("monat", query.monat.as_deref())?,
    })
}

fn filter_value(name: &'static str, raw: Option<&str>) -> Result<Option<i32>, ValidationError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    parse_integer_str(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidFilter {
            name,
            value: raw.to_string(),
        })
}
