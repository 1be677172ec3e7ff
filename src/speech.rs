//! Speech side-channel: outbound announcement contract and phrasing.

use crate::domain::{CommitOutcome, DateLabel};

/// Outbound speech sink invoked after a successful commit.
///
/// Fire-and-forget: implementations must never block or fail the commit that
/// triggered them.
pub trait Announcer {
    fn speak(&self, text: &str);
}

/// Drops every utterance.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnnouncer;

impl Announcer for NullAnnouncer {
    fn speak(&self, _text: &str) {}
}

/// Deterministic announcement for a commit outcome.
pub fn announcement(label: DateLabel, outcome: CommitOutcome) -> String {
    let when = label.phrase();
    match outcome {
        CommitOutcome::NoDelivery => format!("No milk {when}."),
        CommitOutcome::Cleared => format!("Entry removed for {when}."),
        CommitOutcome::Recorded(litres) => {
            let unit = if (litres - 1.0).abs() < f64::EPSILON {
                "litre"
            } else {
                "litres"
            };
            format!("{} {unit} delivered {when}.", format_litres(litres))
        }
    }
}

/// Formats litres without a trailing `.0` on whole amounts.
pub fn format_litres(litres: f64) -> String {
    if (litres - litres.round()).abs() < f64::EPSILON {
        format!("{}", litres as i64)
    } else {
        format!("{litres:.1}")
    }
}
