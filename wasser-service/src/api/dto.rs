//! JSON shapes of the `/api/wassermonat` routes.
//!
//! Field names follow the `WasserMonat` table vocabulary (`Jahr`, `Monat`,
//! `Wasser-Zählerstand`, `Wasserverbrauch`) so existing clients keep working.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use wasser_client::analytics::{KpiMetric, MonthOption, SummaryRow, TableRow};
use wasser_client::MonthlyRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    #[serde(rename = "WasserMonatID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Jahr")]
    pub year: i32,
    #[serde(rename = "Monat")]
    pub month: i32,
    #[serde(rename = "Monatname")]
    pub month_name: String,
    #[serde(rename = "Wasser-Zählerstand")]
    pub meter_reading: Option<f64>,
    #[serde(rename = "Wasserverbrauch")]
    pub consumption: Option<f64>,
}

impl From<&MonthlyRecord> for RecordView {
    fn from(r: &MonthlyRecord) -> Self {
        RecordView {
            id: r.id,
            year: r.year,
            month: r.month,
            month_name: r.month_name().into_owned(),
            meter_reading: r.meter_reading,
            consumption: r.consumption,
        }
    }
}

/// The `Summe` row. Month columns are blank strings, as table renderers
/// expect every column to be present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub key: &'static str,
    #[serde(rename = "Jahr")]
    pub year_label: &'static str,
    #[serde(rename = "Monat")]
    pub month: &'static str,
    #[serde(rename = "Monatname")]
    pub month_name: &'static str,
    #[serde(rename = "Wasser-Zählerstand")]
    pub total_meter_reading: f64,
    #[serde(rename = "Wasserverbrauch")]
    pub total_consumption: f64,
}

impl From<SummaryRow> for SummaryView {
    fn from(s: SummaryRow) -> Self {
        SummaryView {
            key: "sum",
            year_label: SummaryRow::YEAR_LABEL,
            month: "",
            month_name: "",
            total_meter_reading: s.total_meter_reading,
            total_consumption: s.total_consumption,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TableRowView {
    Record(RecordView),
    Summary(SummaryView),
}

impl From<TableRow> for TableRowView {
    fn from(row: TableRow) -> Self {
        match row {
            TableRow::Record(r) => TableRowView::Record(RecordView::from(&r)),
            TableRow::Summary(s) => TableRowView::Summary(s.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub jahr: Option<i32>,
    pub monat: Option<i32>,
    pub rows: Vec<TableRowView>,
}

#[derive(Debug, Serialize)]
pub struct KpiResponse {
    pub jahr: Option<i32>,
    pub kpis: Vec<KpiMetric>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub years: Vec<i32>,
    pub months: Vec<MonthOption>,
    pub default_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Query string of the list/table/KPI routes, kept raw until
/// [`crate::validation::validate_query`] turns it into a filter.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub jahr: Option<String>,
    pub monat: Option<String>,
}

/// Body of `POST /api/wassermonat`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IncomingRecord {
    #[serde(rename = "Jahr", default, deserialize_with = "lenient_i32")]
    pub year: Option<i32>,
    #[serde(rename = "Monat", default, deserialize_with = "lenient_i32")]
    pub month: Option<i32>,
    #[serde(rename = "Wasser-Zählerstand", default, deserialize_with = "lenient_f64")]
    pub meter_reading: Option<f64>,
    #[serde(rename = "Wasserverbrauch", default, deserialize_with = "lenient_f64")]
    pub consumption: Option<f64>,
}

/// Body of `PUT /api/wassermonat/:id`. Any other fields are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IncomingUpdate {
    #[serde(rename = "Wasser-Zählerstand", default, deserialize_with = "lenient_f64")]
    pub meter_reading: Option<f64>,
    #[serde(rename = "Wasserverbrauch", default, deserialize_with = "lenient_f64")]
    pub consumption: Option<f64>,
}

/// Parse a quantity typed into a form.
///
/// Blank means missing. Anything else that does not parse reads as `0`.
/// A lone decimal comma (`"12,5"`) is accepted.
pub fn parse_quantity_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Some(normalized.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0))
}

/// Parse a year or month. Blank or non-integral input is missing.
pub fn parse_integer_str(s: &str) -> Option<i32> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn quantity_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0)),
        Value::String(s) => parse_quantity_str(s),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Some(0.0),
    }
}

fn integer_from_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => parse_integer_str(s),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(quantity_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer_from_value(&Value::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn incoming_record_accepts_numbers_and_numeric_strings() {
        let incoming: IncomingRecord = serde_json::from_value(json!({
            "Jahr": "2024",
            "Monat": 3,
            "Wasser-Zählerstand": "1234,5",
            "Wasserverbrauch": 17.25
        }))
        .unwrap();

        assert_eq!(incoming.year, Some(2024));
        assert_eq!(incoming.month, Some(3));
        assert_eq!(incoming.meter_reading, Some(1234.5));
        assert_eq!(incoming.consumption, Some(17.25));
    }

    #[test]
    fn blank_null_and_absent_are_missing() {
        let incoming: IncomingRecord = serde_json::from_value(json!({
            "Jahr": "",
            "Wasser-Zählerstand": null
        }))
        .unwrap();

        assert_eq!(incoming.year, None);
        assert_eq!(incoming.month, None);
        assert_eq!(incoming.meter_reading, None);
        assert_eq!(incoming.consumption, None);
    }

    #[test]
    fn garbage_quantity_reads_as_zero() {
        assert_eq!(parse_quantity_str("abc"), Some(0.0));
        assert_eq!(parse_quantity_str("NaN"), Some(0.0));
        assert_eq!(parse_quantity_str(" 42 "), Some(42.0));
        assert_eq!(parse_quantity_str("1.234,5"), Some(0.0));
    }

    #[test]
    fn update_ignores_unrelated_fields() {
        let update: IncomingUpdate = serde_json::from_value(json!({
            "WasserMonatID": 5,
            "Jahr": 2024,
            "Monatname": "Mai",
            "Wasser-Zählerstand": 300,
            "Wasserverbrauch": "12"
        }))
        .unwrap();

        assert_eq!(update.meter_reading, Some(300.0));
        assert_eq!(update.consumption, Some(12.0));
    }

    #[test]
    fn summary_row_uses_table_vocabulary() {
        let view = TableRowView::from(TableRow::Summary(SummaryRow {
            total_meter_reading: 220.0,
            total_consumption: 30.0,
        }));

        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({
                "key": "sum",
                "Jahr": "Summe",
                "Monat": "",
                "Monatname": "",
                "Wasser-Zählerstand": 220.0,
                "Wasserverbrauch": 30.0
            })
        );
    }

    #[test]
    fn record_row_carries_month_name() {
        let record = MonthlyRecord {
            id: Some(3),
            year: 2024,
            month: 5,
            meter_reading: Some(150.0),
            consumption: None,
        };

        let value = serde_json::to_value(RecordView::from(&record)).unwrap();
        assert_eq!(value["WasserMonatID"], json!(3));
        assert_eq!(value["Monatname"], json!("Mai"));
        assert_eq!(value["Wasserverbrauch"], Value::Null);
    }
}
