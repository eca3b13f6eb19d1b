//! Clock used to stamp progress transitions.

use chrono::{Duration, Utc};

use crate::Time;

/// Source of "now" for transitions.
///
/// `Fixed` makes timestamps deterministic in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Wall-clock time
    #[default]
    System,
    /// Always returns the held instant
    Fixed(Time),
}

impl Clock {
    /// A clock pinned at `at`.
    pub fn fixed(at: Time) -> Self {
        Self::Fixed(at)
    }

    /// Current time according to this clock.
    pub fn now(&self) -> Time {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc::now();
        let mut clock = Clock::fixed(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::days(1));
        assert_eq!(clock.now(), start + Duration::days(1));
    }

    #[test]
    fn test_system_clock_ignores_advance() {
        let mut clock = Clock::default();
        clock.advance(Duration::days(365));
        assert!(clock.now() <= Utc::now());
    }
}
