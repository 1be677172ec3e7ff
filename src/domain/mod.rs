use chrono::NaiveDate;

/// Upper bound for a single day's delivery, in litres.
pub const MAX_LITRES: f64 = 10.0;

/// Increment used by the quick-adjust controls, in litres.
pub const LITRE_STEP: f64 = 0.5;

/// Recorded state of one calendar day.
///
/// `Absent` is the default for unmapped days and is never materialized in the
/// ledger map; deletion happens by committing a zero amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryRecord {
    /// No entry exists for the day.
    Absent,
    /// The day was explicitly marked as skipped.
    NoDelivery,
    /// Litres delivered, in `(0, MAX_LITRES]`.
    Quantity(f64),
}

/// Uncommitted edit buffer for the active date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pending {
    /// Litres staged for commit. `Amount(0.0)` deletes the day's entry.
    Amount(f64),
    /// Stages an explicit no-delivery marker.
    NoDelivery,
}

impl Pending {
    /// Seeds the buffer from a stored record when the active date changes.
    pub fn from_record(record: DeliveryRecord) -> Self {
        match record {
            DeliveryRecord::Absent => Pending::Amount(0.0),
            DeliveryRecord::NoDelivery => Pending::NoDelivery,
            DeliveryRecord::Quantity(q) => Pending::Amount(q),
        }
    }

    /// Adds `delta` litres, saturating into `[0, MAX_LITRES]`.
    ///
    /// A `NoDelivery` buffer resets to zero before the delta applies.
    pub fn adjust(self, delta: f64) -> Self {
        let base = match self {
            Pending::NoDelivery => 0.0,
            Pending::Amount(q) => q,
        };
        Pending::Amount((base + delta).clamp(0.0, MAX_LITRES))
    }

    /// Litres currently staged; zero for a `NoDelivery` buffer.
    pub fn litres(self) -> f64 {
        match self {
            Pending::NoDelivery => 0.0,
            Pending::Amount(q) => q,
        }
    }
}

/// Result of transferring a pending buffer into the ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// A quantity was stored (already clamped).
    Recorded(f64),
    /// The day was marked as skipped.
    NoDelivery,
    /// The day's entry was removed.
    Cleared,
}

/// Classification of a date relative to the clock's today.
///
/// Drives the entry-view header, the quick-navigation visibility, and the
/// spoken announcement prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabel {
    Today,
    Yesterday,
    Other(NaiveDate),
}

impl DateLabel {
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        if date == today {
            DateLabel::Today
        } else if today.pred_opt() == Some(date) {
            DateLabel::Yesterday
        } else {
            DateLabel::Other(date)
        }
    }

    /// Phrase used inside spoken announcements, e.g. "today" or "on 5 March".
    pub fn phrase(&self) -> String {
        match self {
            DateLabel::Today => "today".to_string(),
            DateLabel::Yesterday => "yesterday".to_string(),
            DateLabel::Other(date) => date.format("on %-d %B").to_string(),
        }
    }
}
