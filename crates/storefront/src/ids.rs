//! Timestamp-derived entity ids.

use std::cell::Cell;

use chrono::Utc;

/// Generates ids from the current Unix time in milliseconds.
///
/// Ids issued by one generator are strictly increasing: two requests in the
/// same millisecond get consecutive values instead of a duplicate.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: Cell<i64>,
}

impl TimestampIds {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id, as a decimal string.
    #[must_use]
    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last.get().saturating_add(1));
        self.last.set(id);
        id.to_string()
    }
}
