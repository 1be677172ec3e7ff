//! Snapshot codec.
//!
//! The wire format keeps the historical shape: one flat JSON object holding an
//! `entries` map of litres per date key plus the settings fields. A reserved
//! sentinel value stands in for an explicit no-delivery day; the sentinel
//! never leaves this module.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::config::Settings;
use crate::domain::{DeliveryRecord, MAX_LITRES};
use crate::errors::MilkbookError;
use crate::ledger::Ledger;

/// Stored in place of a litre amount to mark an explicit no-delivery day.
const NO_DELIVERY_SENTINEL: f64 = 0.001;

/// Decoded values at or below this are treated as the sentinel.
const SENTINEL_CEILING: f64 = 0.002;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotWire {
    entries: BTreeMap<String, f64>,
    rate: u32,
    voice_enabled: bool,
    dark_mode: bool,
}

/// Serializes the combined application state.
pub fn encode(ledger: &Ledger, settings: &Settings) -> Result<String, MilkbookError> {
    let mut entries = BTreeMap::new();
    for (date, record) in ledger.iter() {
        let value = match record {
            DeliveryRecord::Absent => continue,
            DeliveryRecord::NoDelivery => NO_DELIVERY_SENTINEL,
            DeliveryRecord::Quantity(litres) => litres,
        };
        entries.insert(date.format(DATE_KEY_FORMAT).to_string(), value);
    }
    let wire = SnapshotWire {
        entries,
        rate: settings.rate,
        voice_enabled: settings.voice_enabled,
        dark_mode: settings.dark_mode,
    };
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Rebuilds application state from a raw snapshot.
///
/// Decoding is total: every field falls back independently to its default,
/// unparseable date keys and non-positive amounts are skipped, and a snapshot
/// that is not valid JSON yields the default state. `ambient_dark` supplies
/// the host theme preference used when the snapshot predates the dark-mode
/// field.
pub fn decode(raw: &str, ambient_dark: bool) -> (Ledger, Settings) {
    let root: Value = serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::warn!(%err, "snapshot is not valid JSON, starting from defaults");
        Value::Null
    });

    let mut ledger = Ledger::new();
    if let Some(entries) = root.get("entries").and_then(Value::as_object) {
        for (key, value) in entries {
            let Ok(date) = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT) else {
                tracing::warn!(%key, "skipping entry with unparseable date key");
                continue;
            };
            let Some(litres) = value.as_f64() else {
                tracing::warn!(%key, "skipping entry with non-numeric amount");
                continue;
            };
            if litres <= 0.0 {
                continue;
            }
            let record = if litres <= SENTINEL_CEILING {
                DeliveryRecord::NoDelivery
            } else {
                DeliveryRecord::Quantity(litres.min(MAX_LITRES))
            };
            ledger.restore_record(date, record);
        }
    }

    let defaults = Settings::default();
    let settings = Settings {
        rate: root
            .get("rate")
            .and_then(Value::as_u64)
            .map(|rate| rate.min(u64::from(u32::MAX)) as u32)
            .unwrap_or(defaults.rate),
        voice_enabled: root
            .get("voiceEnabled")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.voice_enabled),
        dark_mode: root
            .get("darkMode")
            .and_then(Value::as_bool)
            .unwrap_or(ambient_dark),
    };
    (ledger, settings)
}
