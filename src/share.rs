//! Share payload for the external message composer.

use crate::billing::MonthTotals;
use crate::speech::format_litres;

/// Builds the plain-text month statement handed to the external composer.
pub fn share_message(month_label: &str, totals: &MonthTotals) -> String {
    format!(
        "Milk account: {month_label}\n------------------\nTotal milk: {} L\nTotal bill: \u{20b9}{}\n------------------\nSent from Milkbook",
        format_litres(totals.total_litres),
        totals.total_bill
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_carries_month_quantity_and_bill() {
        let totals = MonthTotals {
            total_litres: 12.5,
            total_bill: 750,
        };
        let message = share_message("Mar 2024", &totals);
        assert!(message.contains("Mar 2024"));
        assert!(message.contains("12.5 L"));
        assert!(message.contains("750"));
    }
}
