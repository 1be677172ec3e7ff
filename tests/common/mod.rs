use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use milkbook::speech::Announcer;
use milkbook::time::Clock;

/// Deterministic clock shared between a test and the navigator under test.
#[derive(Clone)]
pub struct FixedClock(Arc<Mutex<DateTime<Utc>>>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .unwrap();
        Self(Arc::new(Mutex::new(now)))
    }

    #[allow(dead_code)]
    pub fn advance_ms(&self, ms: i64) {
        let mut guard = self.0.lock().unwrap();
        *guard += Duration::milliseconds(ms);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Captures spoken announcements for assertions.
#[derive(Default, Clone)]
pub struct RecordingAnnouncer(Arc<Mutex<Vec<String>>>);

impl RecordingAnnouncer {
    #[allow(dead_code)]
    pub fn utterances(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Announcer for RecordingAnnouncer {
    fn speak(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}
