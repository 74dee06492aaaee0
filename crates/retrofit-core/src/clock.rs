//! Simulated calendar time.
//!
//! The clock holds the start datetime, the step interval, and a step
//! counter. The current datetime is always `start + steps * interval`; it
//! is advanced with checked arithmetic rather than recomputed.

use chrono::{DateTime, TimeDelta, Utc};

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Step counter would overflow.
    #[error("step counter overflow: cannot advance beyond u64::MAX")]
    StepOverflow,

    /// The current datetime would leave chrono's representable range.
    #[error("datetime overflow: cannot advance past {current}")]
    DateTimeOverflow {
        /// The datetime the clock was at.
        current: DateTime<Utc>,
    },

    /// The step interval is zero or negative.
    #[error("step interval must be positive, got {interval}")]
    NonPositiveInterval {
        /// The rejected interval.
        interval: TimeDelta,
    },
}

/// Simulation clock tracking calendar time and the number of steps taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    start: DateTime<Utc>,
    current: DateTime<Utc>,
    step_interval: TimeDelta,
    steps: u64,
}

impl SimulationClock {
    /// Create a clock positioned at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::NonPositiveInterval`] if `step_interval` is
    /// not strictly positive.
    pub fn new(start: DateTime<Utc>, step_interval: TimeDelta) -> Result<Self, ClockError> {
        if step_interval <= TimeDelta::zero() {
            return Err(ClockError::NonPositiveInterval {
                interval: step_interval,
            });
        }
        Ok(Self {
            start,
            current: start,
            step_interval,
            steps: 0,
        })
    }

    /// Advance by one interval. Returns the new step number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::StepOverflow`] or
    /// [`ClockError::DateTimeOverflow`] if either counter would overflow.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        let steps = self.steps.checked_add(1).ok_or(ClockError::StepOverflow)?;
        let current = self
            .current
            .checked_add_signed(self.step_interval)
            .ok_or(ClockError::DateTimeOverflow {
                current: self.current,
            })?;
        self.steps = steps;
        self.current = current;
        Ok(steps)
    }

    /// Simulated start time.
    pub const fn start_datetime(&self) -> DateTime<Utc> {
        self.start
    }

    /// Current simulated time.
    pub const fn current_datetime(&self) -> DateTime<Utc> {
        self.current
    }

    /// Simulated time covered by one step.
    pub const fn step_interval(&self) -> TimeDelta {
        self.step_interval
    }

    /// Number of steps taken so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether no step has been taken yet.
    pub const fn is_at_start(&self) -> bool {
        self.steps == 0
    }

    /// Whether exactly one step has been taken.
    pub const fn is_first_step(&self) -> bool {
        self.steps == 1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn new_clock_is_at_start() {
        let clock = SimulationClock::new(start(), TimeDelta::days(1)).unwrap();
        assert_eq!(clock.steps(), 0);
        assert_eq!(clock.current_datetime(), start());
        assert!(clock.is_at_start());
        assert!(!clock.is_first_step());
    }

    #[test]
    fn advance_adds_one_interval() {
        let mut clock = SimulationClock::new(start(), TimeDelta::minutes(1440)).unwrap();
        assert_eq!(clock.advance().unwrap(), 1);
        assert!(clock.is_first_step());
        assert_eq!(
            clock.current_datetime(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );

        for _ in 0..365 {
            clock.advance().unwrap();
        }
        assert_eq!(clock.steps(), 366);
        assert!(!clock.is_first_step());
        // 2024 is a leap year, so 366 days land exactly on New Year.
        assert_eq!(
            clock.current_datetime(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(clock.start_datetime(), start());
    }

    #[test]
    fn rejects_non_positive_interval() {
        assert!(matches!(
            SimulationClock::new(start(), TimeDelta::zero()),
            Err(ClockError::NonPositiveInterval { .. })
        ));
        assert!(SimulationClock::new(start(), TimeDelta::days(-1)).is_err());
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = SimulationClock::new(DateTime::<Utc>::MAX_UTC, TimeDelta::days(1)).unwrap();
        assert!(matches!(
            clock.advance(),
            Err(ClockError::DateTimeOverflow { .. })
        ));
        assert_eq!(clock.steps(), 0);
    }
}
