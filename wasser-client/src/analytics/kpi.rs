use crate::domain::MonthlyRecord;

/// The six dashboard metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum KpiKind {
    TotalConsumption,
    MonthlyAverage,
    TotalMeterReading,
    RecordCount,
    PeakConsumption,
    Efficiency,
}

impl KpiKind {
    pub const ALL: [KpiKind; 6] = [
        KpiKind::TotalConsumption,
        KpiKind::MonthlyAverage,
        KpiKind::TotalMeterReading,
        KpiKind::RecordCount,
        KpiKind::PeakConsumption,
        KpiKind::Efficiency,
    ];

    pub fn title(self) -> &'static str {
        match self {
            KpiKind::TotalConsumption => "Total consumption",
            KpiKind::MonthlyAverage => "Monthly average",
            KpiKind::TotalMeterReading => "Total meter reading",
            KpiKind::RecordCount => "Record count",
            KpiKind::PeakConsumption => "Peak consumption",
            KpiKind::Efficiency => "Efficiency",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            KpiKind::RecordCount => "/12",
            KpiKind::Efficiency => "m³/Monat",
            _ => "m³",
        }
    }

    /// Record count and efficiency are shown without a year-over-year delta.
    pub fn has_variation(self) -> bool {
        !matches!(self, KpiKind::RecordCount | KpiKind::Efficiency)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KpiMetric {
    pub kind: KpiKind,
    pub title: &'static str,
    pub value: f64,
    pub unit: &'static str,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub variation: Option<Variation>,
}

/// Year-over-year comparison of one metric.
///
/// The deltas are `None` whenever `has_comparison_data` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Variation {
    pub has_comparison_data: bool,
    pub absolute_delta: Option<f64>,
    pub percentage_delta: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Variation {
    pub fn no_data() -> Self {
        Self {
            has_comparison_data: false,
            absolute_delta: None,
            percentage_delta: None,
        }
    }

    /// Direction of `current - previous`. Whether that is good news is left
    /// to whoever renders it.
    pub fn trend(&self) -> Option<Trend> {
        let delta = self.absolute_delta?;
        Some(if delta > 0.0 {
            Trend::Up
        } else if delta < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        })
    }
}

/// Compare `current` against `previous`.
///
/// There is no comparison when the previous year has no records or its value
/// is zero, since a percentage against zero has no meaning.
pub fn compute_variation(current: f64, previous: f64, has_previous_records: bool) -> Variation {
    if !has_previous_records || previous == 0.0 || !previous.is_finite() {
        return Variation::no_data();
    }

    let absolute = current - previous;
    Variation {
        has_comparison_data: true,
        absolute_delta: Some(absolute),
        percentage_delta: Some(absolute / previous * 100.0),
    }
}

/// Per-year accumulators shared by all six metrics.
#[derive(Debug, Clone, Copy, Default)]
struct YearStats {
    count: usize,
    total_consumption: f64,
    total_meter_reading: f64,
    peak_consumption: Option<f64>,
}

impl YearStats {
    fn collect(records: &[MonthlyRecord], year: i32) -> Self {
        records
            .iter()
            .filter(|r| r.year == year)
            .fold(Self::default(), |acc, r| {
                let consumption = r.consumption_or_zero();
                let peak = acc.peak_consumption.map_or(consumption, |p| p.max(consumption));
                Self {
                    count: acc.count + 1,
                    total_consumption: acc.total_consumption + consumption,
                    total_meter_reading: acc.total_meter_reading + r.meter_reading_or_zero(),
                    peak_consumption: Some(peak),
                }
            })
    }

    fn value(&self, kind: KpiKind) -> f64 {
        match kind {
            KpiKind::TotalConsumption => self.total_consumption,
            KpiKind::MonthlyAverage => self.total_consumption / self.count.max(1) as f64,
            KpiKind::TotalMeterReading => self.total_meter_reading,
            KpiKind::RecordCount => self.count as f64,
            KpiKind::PeakConsumption => self.peak_consumption.unwrap_or(0.0),
            KpiKind::Efficiency => {
                if self.count == 0 {
                    0.0
                } else {
                    self.total_consumption / self.count as f64
                }
            }
        }
    }
}

/// Derive the six dashboard metrics for `selected_year`, comparing against
/// `selected_year - 1` where the metric supports it.
pub fn compute_kpis(records: &[MonthlyRecord], selected_year: i32) -> Vec<KpiMetric> {
    let current = YearStats::collect(records, selected_year);
    let previous = selected_year
        .checked_sub(1)
        .map(|year| YearStats::collect(records, year))
        .unwrap_or_default();

    KpiKind::ALL
        .iter()
        .map(|&kind| {
            let value = current.value(kind);
            let variation = kind
                .has_variation()
                .then(|| compute_variation(value, previous.value(kind), previous.count > 0));

            KpiMetric {
                kind,
                title: kind.title(),
                value,
                unit: kind.unit(),
                variation,
            }
        })
        .collect()
}
