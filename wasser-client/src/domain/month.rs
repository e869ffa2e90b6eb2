use std::borrow::Cow;

/// Display names for months 1..=12, indexed from zero.
pub const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Map a month number to its display label.
///
/// Values outside 1..=12 are still labelled (`"Monat 13"`) rather than
/// rejected, so a malformed row stays visible in the table.
pub fn month_name(month: i32) -> Cow<'static, str> {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTH_NAMES.get(idx))
        .map(|name| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(format!("Monat {month}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_calendar_months() {
        assert_eq!(month_name(1), "Januar");
        assert_eq!(month_name(3), "März");
        assert_eq!(month_name(12), "Dezember");
    }

    #[test]
    fn out_of_range_months_get_generic_label() {
        assert_eq!(month_name(0), "Monat 0");
        assert_eq!(month_name(13), "Monat 13");
        assert_eq!(month_name(-2), "Monat -2");
    }
}
