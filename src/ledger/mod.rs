//! Dated entry ledger: the persisted mapping from calendar day to record.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CommitOutcome, DeliveryRecord, Pending, MAX_LITRES};

/// Mapping from calendar day to delivery record.
///
/// Invariant: a key is present iff its record is `NoDelivery` or `Quantity`;
/// `Absent` days are never materialized. Mutation happens only through
/// [`Ledger::commit`] and the codec's [`Ledger::restore_record`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: BTreeMap<NaiveDate, DeliveryRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lookup: `Absent` when the day is unmapped.
    pub fn get(&self, date: NaiveDate) -> DeliveryRecord {
        self.entries
            .get(&date)
            .copied()
            .unwrap_or(DeliveryRecord::Absent)
    }

    /// Transfers an edit buffer into the ledger.
    ///
    /// A zero amount removes the key; positive amounts are clamped into
    /// `(0, MAX_LITRES]` before they are stored.
    pub fn commit(&mut self, date: NaiveDate, pending: Pending) -> CommitOutcome {
        match pending {
            Pending::NoDelivery => {
                self.entries.insert(date, DeliveryRecord::NoDelivery);
                CommitOutcome::NoDelivery
            }
            Pending::Amount(q) if q <= 0.0 => {
                self.entries.remove(&date);
                CommitOutcome::Cleared
            }
            Pending::Amount(q) => {
                let litres = q.min(MAX_LITRES);
                self.entries.insert(date, DeliveryRecord::Quantity(litres));
                CommitOutcome::Recorded(litres)
            }
        }
    }

    /// Reinstates a decoded record. `Absent` is ignored, keeping the
    /// materialization invariant intact.
    pub fn restore_record(&mut self, date: NaiveDate, record: DeliveryRecord) {
        match record {
            DeliveryRecord::Absent => {}
            other => {
                self.entries.insert(date, other);
            }
        }
    }

    /// Iterates mapped days in natural date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, DeliveryRecord)> + '_ {
        self.entries.iter().map(|(date, record)| (*date, *record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
