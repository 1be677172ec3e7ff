//! View-state navigator.
//!
//! Finite-state coordinator over the active tab, the active edit date, the
//! calendar cursor, the uncommitted quantity buffer, and the modal layer. The
//! navigator owns the ledger and settings, gates every mutation, and keeps the
//! derived monthly totals consistent with each one.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

use crate::{
    billing::{self, MonthTotals},
    config::Settings,
    domain::{DateLabel, DeliveryRecord, Pending},
    ledger::Ledger,
    share,
    speech::{announcement, Announcer},
    storage::{codec, SnapshotStore},
    time::Clock,
};

/// How long a success toast stays on screen.
pub const TOAST_DURATION_MS: i64 = 2000;

/// Delay before the view returns to today after editing another date.
pub const RETURN_TO_TODAY_DELAY_MS: i64 = 1500;

/// Clock hour after which a missing entry for today raises the reminder.
const REMINDER_HOUR: u32 = 20;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Entry,
    LedgerView,
}

/// Modal layered over the active tab; at most one open at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Settings,
    ConfirmEdit { target: NaiveDate },
    SuccessToast { title: String, detail: String },
}

/// Entry on the back-navigation stack. The success toast is transient and
/// auto-dismissing, so it carries no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavMarker {
    Settings,
    ConfirmEdit,
    LedgerView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    DismissToast,
    ReturnToToday,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    action: DeferredAction,
    due: DateTime<Utc>,
    token: u64,
}

pub struct Navigator {
    ledger: Ledger,
    settings: Settings,
    store: Box<dyn SnapshotStore>,
    announcer: Box<dyn Announcer>,
    clock: Box<dyn Clock>,

    tab: Tab,
    active_date: NaiveDate,
    cursor: (i32, u32),
    pending: Pending,
    modal: Option<Modal>,
    markers: Vec<NavMarker>,
    deferred: Vec<Deferred>,
    revision: u64,
    totals: MonthTotals,
}

impl Navigator {
    /// Restores persisted state and seeds the view to today.
    ///
    /// `ambient_dark` is the host theme preference, used only when the
    /// snapshot predates the dark-mode field.
    pub fn new(
        store: Box<dyn SnapshotStore>,
        announcer: Box<dyn Announcer>,
        clock: Box<dyn Clock>,
        ambient_dark: bool,
    ) -> Self {
        let (ledger, settings) = match store.load() {
            Ok(Some(raw)) => codec::decode(&raw, ambient_dark),
            Ok(None) => (
                Ledger::new(),
                Settings {
                    dark_mode: ambient_dark,
                    ..Settings::default()
                },
            ),
            Err(err) => {
                tracing::warn!(%err, "snapshot load failed, starting from an empty ledger");
                (
                    Ledger::new(),
                    Settings {
                        dark_mode: ambient_dark,
                        ..Settings::default()
                    },
                )
            }
        };

        let today = clock.today();
        let cursor = (today.year(), today.month());
        let pending = Pending::from_record(ledger.get(today));
        let totals = billing::aggregate(&ledger, cursor.0, cursor.1, settings.rate);

        Self {
            ledger,
            settings,
            store,
            announcer,
            clock,
            tab: Tab::Entry,
            active_date: today,
            cursor,
            pending,
            modal: None,
            markers: Vec::new(),
            deferred: Vec::new(),
            revision: 0,
            totals,
        }
    }

    // --- read-only exposure for the presentation layer ---

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active_date
    }

    pub fn calendar_cursor(&self) -> (i32, u32) {
        self.cursor
    }

    pub fn pending(&self) -> Pending {
        self.pending
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Latest aggregation result for the calendar cursor month.
    pub fn totals(&self) -> MonthTotals {
        self.totals
    }

    /// Per-day lookup for calendar rendering.
    pub fn record(&self, date: NaiveDate) -> DeliveryRecord {
        self.ledger.get(date)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Classification of the active date relative to the clock's today.
    pub fn date_label(&self) -> DateLabel {
        DateLabel::classify(self.active_date, self.clock.today())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether the host back-action would do anything.
    pub fn can_go_back(&self) -> bool {
        !self.markers.is_empty()
    }

    /// True in the evening while today still has no record.
    pub fn reminder_due(&self) -> bool {
        self.clock.now().hour() >= REMINDER_HOUR
            && matches!(self.ledger.get(self.clock.today()), DeliveryRecord::Absent)
    }

    /// Plain-text statement for the external composer.
    pub fn share_text(&self) -> String {
        let label = billing::month_label(self.cursor.0, self.cursor.1);
        share::share_message(&label, &self.totals)
    }

    // --- date navigation ---

    pub fn show_today(&mut self) {
        self.touch();
        let today = self.clock.today();
        self.set_active_date(today);
    }

    pub fn show_yesterday(&mut self) {
        self.touch();
        let today = self.clock.today();
        self.set_active_date(today.pred_opt().unwrap_or(today));
    }

    // --- edit flow from the calendar ---

    /// Opens the edit-confirmation modal for a raw calendar date key.
    ///
    /// An unparseable key closes the flow silently: the request is dropped and
    /// no transition happens.
    pub fn begin_edit_from_calendar(&mut self, date_key: &str) {
        self.touch();
        self.clear_toast();
        match NaiveDate::parse_from_str(date_key, DATE_KEY_FORMAT) {
            Ok(target) if self.modal.is_none() => {
                self.modal = Some(Modal::ConfirmEdit { target });
                self.markers.push(NavMarker::ConfirmEdit);
            }
            Ok(_) => {}
            Err(_) => {
                tracing::warn!(date_key, "rejecting edit request with unparseable date");
                if matches!(self.modal, Some(Modal::ConfirmEdit { .. })) {
                    self.dismiss_modal();
                }
            }
        }
    }

    /// Confirms the pending edit target: closes the modal, switches to the
    /// entry tab, and loads the target date into the edit buffer.
    pub fn confirm_edit(&mut self) {
        self.touch();
        let target = match self.modal {
            Some(Modal::ConfirmEdit { target }) => target,
            _ => return,
        };
        self.dismiss_modal();
        self.set_tab(Tab::Entry);
        self.set_active_date(target);
    }

    /// Discards the edit target and closes the modal with no further effect.
    pub fn cancel_edit(&mut self) {
        self.touch();
        if matches!(self.modal, Some(Modal::ConfirmEdit { .. })) {
            self.dismiss_modal();
        }
    }

    // --- pending buffer ---

    pub fn adjust_pending(&mut self, delta: f64) {
        self.touch();
        self.pending = self.pending.adjust(delta);
    }

    pub fn clear_pending(&mut self) {
        self.touch();
        self.pending = Pending::Amount(0.0);
    }

    pub fn mark_no_delivery(&mut self) {
        self.touch();
        self.pending = Pending::NoDelivery;
    }

    /// Commits the edit buffer: writes the ledger, snapshots synchronously,
    /// announces when voice is enabled, and raises the success toast. Commits
    /// for a date other than today schedule an automatic return.
    pub fn commit_pending(&mut self) {
        self.touch();
        let date = self.active_date;
        let outcome = self.ledger.commit(date, self.pending);
        self.pending = Pending::from_record(self.ledger.get(date));
        self.persist();
        self.recompute_totals();

        let label = DateLabel::classify(date, self.clock.today());
        if self.settings.voice_enabled {
            self.announcer.speak(&announcement(label, outcome));
        }

        if label == DateLabel::Today {
            self.show_toast("Saved!", "Entry updated.");
        } else {
            let detail = date.format("%-d %B %Y").to_string();
            self.show_toast("Date updated", &detail);
            self.schedule(
                DeferredAction::ReturnToToday,
                Duration::milliseconds(RETURN_TO_TODAY_DELAY_MS),
            );
        }
    }

    // --- tabs and calendar cursor ---

    pub fn switch_tab(&mut self, tab: Tab) {
        self.touch();
        if tab == self.tab {
            return;
        }
        self.set_tab(tab);
        if tab == Tab::LedgerView {
            self.recompute_totals();
        }
    }

    pub fn change_calendar_month(&mut self, delta: i32) {
        self.touch();
        self.cursor = billing::shift_month(self.cursor.0, self.cursor.1, delta);
        self.recompute_totals();
    }

    // --- settings ---

    pub fn open_settings(&mut self) {
        self.touch();
        self.clear_toast();
        if self.modal.is_some() {
            return;
        }
        self.modal = Some(Modal::Settings);
        self.markers.push(NavMarker::Settings);
    }

    pub fn close_settings(&mut self) {
        self.touch();
        if matches!(self.modal, Some(Modal::Settings)) {
            self.dismiss_modal();
        }
    }

    /// Applies the settings form and snapshots.
    ///
    /// A rate that does not parse as a non-negative integer is ignored and the
    /// previous rate kept; this is never surfaced as an error.
    pub fn save_settings(&mut self, rate_input: &str, voice_enabled: bool, dark_mode: bool) {
        self.touch();
        match rate_input.trim().parse::<u32>() {
            Ok(rate) => self.settings.rate = rate,
            Err(_) => {
                tracing::warn!(rate_input, "keeping previous rate, input is not a whole number");
            }
        }
        self.settings.voice_enabled = voice_enabled;
        self.settings.dark_mode = dark_mode;
        self.persist();
        self.recompute_totals();
        if matches!(self.modal, Some(Modal::Settings)) {
            self.dismiss_modal();
        }
        self.show_toast("Settings saved", "Changes applied.");
    }

    // --- host back-action ---

    /// Pops the most recent navigation marker. A modal marker closes that
    /// modal; a ledger-view marker returns to the entry tab; an empty stack is
    /// a no-op handled by the host.
    pub fn back(&mut self) {
        self.touch();
        let Some(marker) = self.markers.pop() else {
            return;
        };
        match marker {
            NavMarker::Settings => {
                if matches!(self.modal, Some(Modal::Settings)) {
                    self.modal = None;
                }
            }
            NavMarker::ConfirmEdit => {
                if matches!(self.modal, Some(Modal::ConfirmEdit { .. })) {
                    self.modal = None;
                }
            }
            NavMarker::LedgerView => {
                if self.tab == Tab::LedgerView {
                    self.tab = Tab::Entry;
                }
            }
        }
    }

    // --- deferred actions ---

    /// Fires due deferred actions.
    ///
    /// A task only runs when no user action intervened since it was scheduled
    /// (its revision token is still current) and its triggering condition
    /// still holds; stale tasks are dropped.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let mut due = Vec::new();
        self.deferred.retain(|task| {
            if task.due <= now {
                due.push(*task);
                false
            } else {
                true
            }
        });
        for task in due {
            if task.token != self.revision {
                continue;
            }
            match task.action {
                DeferredAction::DismissToast => {
                    if matches!(self.modal, Some(Modal::SuccessToast { .. })) {
                        self.modal = None;
                    }
                }
                DeferredAction::ReturnToToday => {
                    let today = self.clock.today();
                    if self.active_date != today {
                        self.set_active_date(today);
                    }
                }
            }
        }
    }

    // --- internals ---

    /// Marks a user-driven transition; outstanding deferred tokens become
    /// stale.
    fn touch(&mut self) {
        self.revision += 1;
    }

    fn set_active_date(&mut self, date: NaiveDate) {
        self.active_date = date;
        self.pending = Pending::from_record(self.ledger.get(date));
    }

    fn set_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        match tab {
            Tab::LedgerView => self.markers.push(NavMarker::LedgerView),
            Tab::Entry => {
                if let Some(pos) = self
                    .markers
                    .iter()
                    .rposition(|marker| *marker == NavMarker::LedgerView)
                {
                    self.markers.remove(pos);
                }
            }
        }
    }

    /// The toast is transient; any modal-opening action replaces it.
    fn clear_toast(&mut self) {
        if matches!(self.modal, Some(Modal::SuccessToast { .. })) {
            self.modal = None;
        }
    }

    fn dismiss_modal(&mut self) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        let marker = match modal {
            Modal::Settings => NavMarker::Settings,
            Modal::ConfirmEdit { .. } => NavMarker::ConfirmEdit,
            Modal::SuccessToast { .. } => return,
        };
        if let Some(pos) = self.markers.iter().rposition(|entry| *entry == marker) {
            self.markers.remove(pos);
        }
    }

    fn show_toast(&mut self, title: &str, detail: &str) {
        self.modal = Some(Modal::SuccessToast {
            title: title.to_string(),
            detail: detail.to_string(),
        });
        self.schedule(
            DeferredAction::DismissToast,
            Duration::milliseconds(TOAST_DURATION_MS),
        );
    }

    fn schedule(&mut self, action: DeferredAction, delay: Duration) {
        self.deferred.push(Deferred {
            action,
            due: self.clock.now() + delay,
            token: self.revision,
        });
    }

    fn recompute_totals(&mut self) {
        self.totals = billing::aggregate(
            &self.ledger,
            self.cursor.0,
            self.cursor.1,
            self.settings.rate,
        );
    }

    /// Snapshots the combined state. A failed write is logged and swallowed;
    /// the in-memory state stays authoritative for the session.
    fn persist(&mut self) {
        match codec::encode(&self.ledger, &self.settings) {
            Ok(raw) => {
                if let Err(err) = self.store.save(&raw) {
                    tracing::warn!(%err, "snapshot write failed, keeping in-memory state");
                }
            }
            Err(err) => tracing::warn!(%err, "snapshot encode failed"),
        }
    }
}
