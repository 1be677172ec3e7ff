//! Monthly aggregation and billing: pure functions over a ledger slice.

use chrono::{Datelike, NaiveDate};

use crate::domain::DeliveryRecord;
use crate::ledger::Ledger;

/// Derived totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTotals {
    pub total_litres: f64,
    pub total_bill: i64,
}

/// Sums every `Quantity` day in the month and prices the total at `rate` per
/// litre.
///
/// `NoDelivery` and `Absent` days contribute nothing. The bill rounds half
/// away from zero, which equals half-up rounding for the non-negative totals
/// this ledger produces.
pub fn aggregate(ledger: &Ledger, year: i32, month: u32, rate: u32) -> MonthTotals {
    let mut total_litres = 0.0;
    for day in 1..=days_in_month(year, month) {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            if let DeliveryRecord::Quantity(litres) = ledger.get(date) {
                total_litres += litres;
            }
        }
    }
    let total_bill = (total_litres * f64::from(rate)).round() as i64;
    MonthTotals {
        total_litres,
        total_bill,
    }
}

/// Shifts a `(year, month)` cursor by `delta` months, carrying across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + delta;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}

/// Number of calendar days in the month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Sunday-based weekday index of the month's first day, for grid layouts.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Short label for a month cursor, e.g. "Mar 2024".
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Pending;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_entry_month_bills_at_rate() {
        let mut ledger = Ledger::new();
        ledger.commit(date(2024, 3, 5), Pending::Amount(1.5));
        let totals = aggregate(&ledger, 2024, 3, 60);
        assert_eq!(totals.total_litres, 1.5);
        assert_eq!(totals.total_bill, 90);
    }

    #[test]
    fn skipped_and_absent_days_contribute_nothing() {
        let mut ledger = Ledger::new();
        ledger.commit(date(2024, 3, 5), Pending::Amount(2.0));
        ledger.commit(date(2024, 3, 6), Pending::NoDelivery);
        let totals = aggregate(&ledger, 2024, 3, 60);
        assert_eq!(totals.total_litres, 2.0);
        assert_eq!(totals.total_bill, 120);
    }

    #[test]
    fn aggregate_is_pure() {
        let mut ledger = Ledger::new();
        ledger.commit(date(2024, 3, 1), Pending::Amount(0.5));
        ledger.commit(date(2024, 3, 31), Pending::Amount(1.0));
        let first = aggregate(&ledger, 2024, 3, 55);
        let second = aggregate(&ledger, 2024, 3, 55);
        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_ignores_neighboring_months() {
        let mut ledger = Ledger::new();
        ledger.commit(date(2024, 2, 29), Pending::Amount(3.0));
        ledger.commit(date(2024, 4, 1), Pending::Amount(3.0));
        let totals = aggregate(&ledger, 2024, 3, 60);
        assert_eq!(totals.total_litres, 0.0);
        assert_eq!(totals.total_bill, 0);
    }

    #[test]
    fn bill_rounds_half_up() {
        let mut ledger = Ledger::new();
        ledger.commit(date(2024, 3, 5), Pending::Amount(0.5));
        // 0.5 litres at 61 per litre is 30.5, which rounds to 31.
        let totals = aggregate(&ledger, 2024, 3, 61);
        assert_eq!(totals.total_bill, 31);
    }

    #[test]
    fn month_shift_carries_across_years() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2023, 12, 1), (2024, 1));
        assert_eq!(shift_month(2024, 3, -15), (2022, 12));
        assert_eq!(shift_month(2024, 3, 22), (2026, 1));
    }

    #[test]
    fn day_counts_handle_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn labels_and_offsets_are_stable() {
        assert_eq!(month_label(2024, 3), "Mar 2024");
        // 1 March 2024 was a Friday.
        assert_eq!(first_weekday_offset(2024, 3), 5);
    }
}
