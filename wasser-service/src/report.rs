//! Plain-text rendering of the table and KPI views for the report binary.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use wasser_client::analytics::{KpiKind, KpiMetric, SummaryRow, TableRow, Trend, Variation};

fn format_quantity(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

pub fn render_table(rows: &[TableRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Jahr",
        "Monat",
        "Monatname",
        "Wasser-Zählerstand",
        "Wasserverbrauch",
    ]);

    for row in rows {
        match row {
            TableRow::Record(r) => {
                table.add_row(vec![
                    Cell::new(r.year),
                    Cell::new(r.month),
                    Cell::new(r.month_name()),
                    Cell::new(format_quantity(r.meter_reading)),
                    Cell::new(format_quantity(r.consumption)),
                ]);
            }
            TableRow::Summary(s) => {
                let total =
                    |v: f64| Cell::new(format_quantity(Some(v))).add_attribute(Attribute::Bold);
                table.add_row(vec![
                    Cell::new(SummaryRow::YEAR_LABEL).add_attribute(Attribute::Bold),
                    Cell::new(""),
                    Cell::new(""),
                    total(s.total_meter_reading),
                    total(s.total_consumption),
                ]);
            }
        }
    }

    table
}

/// Signed delta against the previous year, led by an arrow for its direction.
pub fn format_variation(variation: &Variation) -> String {
    let (Some(trend), Some(abs), Some(pct)) = (
        variation.trend(),
        variation.absolute_delta,
        variation.percentage_delta,
    ) else {
        return "keine Vergleichsdaten".to_string();
    };

    let arrow = match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Flat => "=",
    };
    format!("{arrow} {abs:+.2} ({pct:+.1}%)")
}

fn format_value(metric: &KpiMetric) -> String {
    match metric.kind {
        KpiKind::RecordCount => format!("{}{}", metric.value, metric.unit),
        _ => format!("{:.2} {}", metric.value, metric.unit),
    }
}

pub fn render_kpis(kpis: &[KpiMetric]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["KPI", "Wert", "Vorjahr"]);

    for metric in kpis {
        let variation = metric.variation.as_ref().map(format_variation).unwrap_or_default();
        table.add_row(vec![metric.title.to_string(), format_value(metric), variation]);
    }

    table
}
