//! Text rendering of the navigator's read-only state.

use chrono::NaiveDate;
use colored::Colorize;

use crate::app::{Modal, Navigator, Tab};
use crate::billing::{days_in_month, first_weekday_offset, month_label};
use crate::domain::{DateLabel, DeliveryRecord, Pending};
use crate::speech::format_litres;

pub fn render(navigator: &Navigator) {
    match navigator.modal() {
        Some(Modal::SuccessToast { title, detail }) => {
            println!("{} {}", title.green().bold(), detail);
        }
        Some(Modal::ConfirmEdit { target }) => {
            println!(
                "{}",
                format!(
                    "Edit the entry for {}? Type `confirm` or `cancel`.",
                    target.format("%-d %B %Y")
                )
                .yellow()
            );
            return;
        }
        Some(Modal::Settings) => return,
        None => {}
    }

    match navigator.tab() {
        Tab::Entry => render_entry(navigator),
        Tab::LedgerView => render_ledger_view(navigator),
    }
}

fn render_entry(navigator: &Navigator) {
    let header = match navigator.date_label() {
        DateLabel::Today => format!("Today ({})", navigator.active_date().format("%-d %B %Y")),
        DateLabel::Yesterday => {
            format!("Yesterday ({})", navigator.active_date().format("%-d %B %Y"))
        }
        DateLabel::Other(date) => format!("Editing {}", date.format("%-d %B %Y")),
    };
    println!("{}", header.bold());
    if matches!(navigator.date_label(), DateLabel::Other(_)) {
        println!("{}", "You are editing a past date.".yellow());
    }

    match navigator.pending() {
        Pending::NoDelivery => println!("Pending: {}", "no delivery".red().bold()),
        Pending::Amount(litres) => println!("Pending: {} L", format_litres(litres).bold()),
    }

    match navigator.record(navigator.active_date()) {
        DeliveryRecord::Absent => println!("Recorded: nothing yet"),
        DeliveryRecord::NoDelivery => println!("Recorded: no delivery"),
        DeliveryRecord::Quantity(litres) => println!("Recorded: {} L", format_litres(litres)),
    }

    if navigator.reminder_due() {
        println!("{}", "Today's entry is still missing!".yellow().bold());
    }
}

fn render_ledger_view(navigator: &Navigator) {
    let (year, month) = navigator.calendar_cursor();
    println!("{}", month_label(year, month).bold());
    println!("{}", "Su Mo Tu We Th Fr Sa".dimmed());

    let mut column = first_weekday_offset(year, month);
    let mut line = "   ".repeat(column as usize);
    for day in 1..=days_in_month(year, month) {
        let cell = match NaiveDate::from_ymd_opt(year, month, day).map(|d| navigator.record(d)) {
            Some(DeliveryRecord::Quantity(_)) => format!("{day:>2}").green().bold().to_string(),
            Some(DeliveryRecord::NoDelivery) => format!("{day:>2}").red().to_string(),
            _ => format!("{day:>2}").dimmed().to_string(),
        };
        line.push_str(&cell);
        line.push(' ');
        column += 1;
        if column % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.trim_end().is_empty() {
        println!("{}", line.trim_end());
    }

    let totals = navigator.totals();
    let rate = navigator.settings().rate;
    println!("Total milk: {} L", format_litres(totals.total_litres).bold());
    println!("Rate: \u{20b9}{rate} per litre");
    println!("Bill: {}", format!("\u{20b9}{}", totals.total_bill).bold());
}

pub fn render_settings(rate_text: &str, voice: bool, dark: bool) {
    println!("{}", "Settings".bold());
    println!("  rate  {rate_text}");
    println!("  voice {}", if voice { "on" } else { "off" });
    println!("  theme {}", if dark { "dark" } else { "light" });
    println!("Adjust with `rate <n>`, `voice on|off`, `theme dark|light`; then `apply` or `close`.");
}
