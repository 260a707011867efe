//! Time source for rendering.

use chrono::{Datelike, Utc};

/// Supplies the current year to the footer.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn year(&self) -> i32;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn year(&self) -> i32 {
        Utc::now().year()
    }
}

/// A clock stuck at a given year.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn year(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(FixedClock(2019).year(), 2019);
    }

    #[test]
    fn test_system_clock_is_plausible() {
        assert!(SystemClock.year() >= 2024);
    }
}
