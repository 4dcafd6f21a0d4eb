//! Cancel-and-restart debounce for search input.
//!
//! # Invariants
//! - At most one query is pending; new input replaces it and restarts the
//!   window (last write wins).
//! - A pending query fires at most once, and only once `now >= deadline`.
//! - The debouncer never reads a clock itself; callers pass `now`.

use chrono::{DateTime, TimeDelta, Utc};

/// Quiet period before typed search text is applied.
pub const SEARCH_DEBOUNCE_MS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    text: String,
    deadline: DateTime<Utc>,
}

/// Deferred search application.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: TimeDelta,
    pending: Option<PendingQuery>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(SEARCH_DEBOUNCE_MS))
    }
}

impl SearchDebouncer {
    pub fn new(delay: TimeDelta) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records typed text and (re)schedules it for `now + delay`.
    pub fn input(&mut self, text: impl Into<String>, now: DateTime<Utc>) {
        self.pending = Some(PendingQuery {
            text: text.into(),
            deadline: now + self.delay,
        });
    }

    /// Drops any pending query without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Fires the pending query if its deadline has passed.
    ///
    /// The returned text is lower-cased, ready for matching.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.text.to_lowercase())
    }

    /// When the pending query will fire, if any.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchDebouncer, SEARCH_DEBOUNCE_MS};
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("Milk", start);

        assert_eq!(debouncer.poll(start + TimeDelta::milliseconds(299)), None);
        let at_deadline = start + TimeDelta::milliseconds(SEARCH_DEBOUNCE_MS);
        assert_eq!(debouncer.poll(at_deadline).as_deref(), Some("milk"));
        assert_eq!(debouncer.poll(at_deadline), None);
    }

    #[test]
    fn new_input_restarts_the_window() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("m", start);
        let later = start + TimeDelta::milliseconds(200);
        debouncer.input("mi", later);

        assert_eq!(debouncer.poll(start + TimeDelta::milliseconds(350)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(later + TimeDelta::milliseconds(SEARCH_DEBOUNCE_MS))
        );
        assert_eq!(
            debouncer.poll(later + TimeDelta::milliseconds(300)).as_deref(),
            Some("mi")
        );
    }

    #[test]
    fn cancel_discards_pending_query() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("bills", start);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + TimeDelta::seconds(1)), None);
    }
}
