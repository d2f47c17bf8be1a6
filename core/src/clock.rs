//! Desk clock — owns tick state, pause, and the current instant.

use crate::types::Tick;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeskClock {
    pub current_tick:       Tick,
    pub paused:             bool,
    pub tick_interval_secs: u64,
    pub source:             TimeSource,
}

impl DeskClock {
    pub fn new(source: TimeSource, tick_interval_secs: u64) -> Self {
        Self {
            current_tick: 0,
            paused: true,
            tick_interval_secs,
            source,
        }
    }

    /// Advance one tick. Returns the new tick number.
    /// Panics if called while paused; callers must check.
    pub fn advance(&mut self) -> Tick {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_tick += 1;
        self.current_tick
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    /// Wall time for the system source; for a fixed source, the start
    /// instant plus one interval per elapsed tick, saturating at the
    /// latest representable instant.
    pub fn now(&self) -> DateTime<Utc> {
        match self.source {
            TimeSource::System => Utc::now(),
            TimeSource::Fixed { start } => {
                let elapsed = self.current_tick.saturating_mul(self.tick_interval_secs);
                i64::try_from(elapsed)
                    .ok()
                    .and_then(Duration::try_seconds)
                    .and_then(|offset| start.checked_add_signed(offset))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSource {
    System,
    Fixed { start: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_source_advances_with_ticks() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut clock = DeskClock::new(TimeSource::Fixed { start }, 15);
        assert_eq!(clock.now(), start);
        clock.resume();
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), start + Duration::seconds(30));
    }

    #[test]
    fn fixed_source_saturates_instead_of_overflowing() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut clock = DeskClock::new(TimeSource::Fixed { start }, u64::MAX);
        clock.resume();
        clock.advance();
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);

        let mut clock = DeskClock::new(TimeSource::Fixed { start }, 10_000_000_000_000);
        clock.resume();
        clock.advance();
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    #[should_panic(expected = "paused clock")]
    fn advance_while_paused_panics() {
        let mut clock = DeskClock::new(TimeSource::System, 15);
        clock.advance();
    }
}
