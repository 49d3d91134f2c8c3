use crate::RecordId;
use std::fmt;

/// Prefix of every generated record id
pub const ID_PREFIX: &str = "book-";

/// Millisecond time source for id generation
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given instant. Used by tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Generates `book-<millis>` ids.
///
/// Ids from one generator are strictly increasing: when the clock has not
/// advanced past the last issued value, the next id is the last value + 1.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: None,
        }
    }

    pub fn next_id(&mut self) -> RecordId {
        let now = self.clock.now_millis();
        let millis = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(millis);
        RecordId::new(format!("{}{}", ID_PREFIX, millis))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_uses_clock_millis() {
        let mut ids = IdGenerator::new(FixedClock(1_700_000_000_000));
        assert_eq!(ids.next_id().as_str(), "book-1700000000000");
    }

    #[test]
    fn test_frozen_clock_still_yields_distinct_ids() {
        let mut ids = IdGenerator::new(FixedClock(42));
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();

        assert_eq!(first.as_str(), "book-42");
        assert_eq!(second.as_str(), "book-43");
        assert_eq!(third.as_str(), "book-44");
    }

    #[test]
    fn test_system_clock_ids_have_prefix() {
        let mut ids = IdGenerator::default();
        assert!(ids.next_id().as_str().starts_with(ID_PREFIX));
    }
}
