//! User-tunable settings persisted alongside the ledger snapshot.

/// Default price of one litre.
pub const DEFAULT_RATE: u32 = 60;

/// Settings owned by the application root; mutated only through the
/// navigator's settings-commit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Price per litre, non-negative integer.
    pub rate: u32,
    /// Whether commits are announced over the speech side-channel.
    pub voice_enabled: bool,
    /// Persisted theme preference.
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            voice_enabled: true,
            dark_mode: true,
        }
    }
}
