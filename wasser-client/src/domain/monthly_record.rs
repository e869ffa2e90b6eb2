use std::borrow::Cow;

use super::month::month_name;

/// One row of the `wasser_monat` table.
///
/// Quantities are optional because the table allows NULLs; read them through
/// [`MonthlyRecord::meter_reading_or_zero`] and
/// [`MonthlyRecord::consumption_or_zero`] when aggregating.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MonthlyRecord {
    #[sqlx(rename = "wasser_monat_id")]
    pub id: Option<i64>,
    #[sqlx(rename = "jahr")]
    pub year: i32,
    #[sqlx(rename = "monat")]
    pub month: i32,
    #[sqlx(rename = "wasser_zaehlerstand")]
    pub meter_reading: Option<f64>,
    #[sqlx(rename = "wasserverbrauch")]
    pub consumption: Option<f64>,
}

impl MonthlyRecord {
    pub fn meter_reading_or_zero(&self) -> f64 {
        quantity(self.meter_reading)
    }

    pub fn consumption_or_zero(&self) -> f64 {
        quantity(self.consumption)
    }

    pub fn month_name(&self) -> Cow<'static, str> {
        month_name(self.month)
    }
}

/// A record that has passed input validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMonthlyRecord {
    pub year: i32,
    pub month: i32,
    pub meter_reading: f64,
    pub consumption: f64,
}

impl NewMonthlyRecord {
    pub fn into_record(self, id: i64) -> MonthlyRecord {
        MonthlyRecord {
            id: Some(id),
            year: self.year,
            month: self.month,
            meter_reading: Some(self.meter_reading),
            consumption: Some(self.consumption),
        }
    }
}

/// Absent and non-finite quantities count as zero.
fn quantity(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
