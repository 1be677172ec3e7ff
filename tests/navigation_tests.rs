mod common;

use chrono::NaiveDate;

use common::{FixedClock, RecordingAnnouncer};
use milkbook::app::{Navigator, Tab, RETURN_TO_TODAY_DELAY_MS, TOAST_DURATION_MS};
use milkbook::domain::{DeliveryRecord, Pending};
use milkbook::storage::MemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Harness {
    navigator: Navigator,
    announcer: RecordingAnnouncer,
    clock: FixedClock,
}

fn harness() -> Harness {
    let clock = FixedClock::at(2024, 3, 10, 9);
    let announcer = RecordingAnnouncer::default();
    let navigator = Navigator::new(
        Box::new(MemoryStore::new()),
        Box::new(announcer.clone()),
        Box::new(clock.clone()),
        true,
    );
    Harness {
        navigator,
        announcer,
        clock,
    }
}

#[test]
fn editing_a_past_date_from_the_calendar_end_to_end() {
    let mut h = harness();

    h.navigator.switch_tab(Tab::LedgerView);
    h.navigator.begin_edit_from_calendar("2024-03-02");
    h.navigator.confirm_edit();

    assert_eq!(h.navigator.tab(), Tab::Entry);
    assert_eq!(h.navigator.active_date(), date(2024, 3, 2));

    h.navigator.adjust_pending(0.5);
    h.navigator.adjust_pending(0.5);
    h.navigator.commit_pending();

    assert_eq!(
        h.navigator.record(date(2024, 3, 2)),
        DeliveryRecord::Quantity(1.0)
    );
    assert_eq!(
        h.announcer.utterances(),
        vec!["1 litre delivered on 2 March."]
    );

    // After the scheduled delay the view snaps back to today.
    h.clock.advance_ms(RETURN_TO_TODAY_DELAY_MS + 50);
    h.navigator.tick();
    assert_eq!(h.navigator.active_date(), date(2024, 3, 10));
    assert_eq!(h.navigator.pending(), Pending::Amount(0.0));
}

#[test]
fn cancelled_edit_leaves_no_trace() {
    let mut h = harness();
    h.navigator.switch_tab(Tab::LedgerView);

    h.navigator.begin_edit_from_calendar("2024-03-02");
    h.navigator.cancel_edit();

    assert!(h.navigator.modal().is_none());
    assert_eq!(h.navigator.tab(), Tab::LedgerView);
    assert!(h.navigator.ledger().is_empty());
    assert!(h.announcer.utterances().is_empty());
}

#[test]
fn back_closes_settings_before_leaving_the_ledger_view() {
    let mut h = harness();
    h.navigator.switch_tab(Tab::LedgerView);
    h.navigator.open_settings();

    h.navigator.back();
    assert!(h.navigator.modal().is_none());
    assert_eq!(h.navigator.tab(), Tab::LedgerView);

    h.navigator.back();
    assert_eq!(h.navigator.tab(), Tab::Entry);

    // Base state: nothing left to pop.
    h.navigator.back();
    assert_eq!(h.navigator.tab(), Tab::Entry);
    assert!(!h.navigator.can_go_back());
}

#[test]
fn month_browsing_keeps_aggregates_consistent() {
    let mut h = harness();
    h.navigator.adjust_pending(2.0);
    h.navigator.commit_pending();

    h.navigator.switch_tab(Tab::LedgerView);
    let march = h.navigator.totals();
    assert_eq!(march.total_litres, 2.0);

    h.navigator.change_calendar_month(-1);
    assert_eq!(h.navigator.calendar_cursor(), (2024, 2));
    assert_eq!(h.navigator.totals().total_litres, 0.0);

    h.navigator.change_calendar_month(1);
    assert_eq!(h.navigator.calendar_cursor(), (2024, 3));
    assert_eq!(h.navigator.totals(), march);
}

#[test]
fn no_delivery_day_round_trip_through_the_views() {
    let mut h = harness();
    h.navigator.mark_no_delivery();
    h.navigator.commit_pending();

    assert_eq!(
        h.navigator.record(date(2024, 3, 10)),
        DeliveryRecord::NoDelivery
    );
    assert_eq!(h.navigator.totals().total_litres, 0.0);
    assert_eq!(h.announcer.utterances(), vec!["No milk today."]);

    // Clearing the marker removes the key again.
    h.navigator.clear_pending();
    h.navigator.commit_pending();
    assert_eq!(
        h.navigator.record(date(2024, 3, 10)),
        DeliveryRecord::Absent
    );
    assert_eq!(h.announcer.utterances().len(), 2);
}

#[test]
fn stale_timers_never_mutate_fresh_state() {
    let mut h = harness();
    h.navigator.show_yesterday();
    h.navigator.adjust_pending(1.0);
    h.navigator.commit_pending();

    // The user starts another edit before the return-to-today timer fires.
    h.navigator.switch_tab(Tab::LedgerView);
    h.navigator.begin_edit_from_calendar("2024-03-01");
    h.navigator.confirm_edit();

    h.clock.advance_ms(RETURN_TO_TODAY_DELAY_MS + TOAST_DURATION_MS);
    h.navigator.tick();

    assert_eq!(h.navigator.active_date(), date(2024, 3, 1));
    assert_eq!(h.navigator.tab(), Tab::Entry);
}

#[test]
fn share_text_reflects_the_cursor_month() {
    let mut h = harness();
    h.navigator.adjust_pending(1.5);
    h.navigator.commit_pending();
    h.navigator.switch_tab(Tab::LedgerView);

    let text = h.navigator.share_text();
    assert!(text.contains("Mar 2024"));
    assert!(text.contains("1.5 L"));
    assert!(text.contains("90"));

    h.navigator.change_calendar_month(-1);
    let previous = h.navigator.share_text();
    assert!(previous.contains("Feb 2024"));
    assert!(previous.contains("0 L"));
}
