use std::ops::{Add, AddAssign, Sub};

pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Simulated time in seconds since the start of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// Seconds elapsed since the most recent midnight.
    pub fn time_of_day(self) -> f64 {
        self.0.rem_euclid(SECONDS_PER_DAY)
    }

    /// Hour-of-day slot, `floor(t / 3600) mod 24`.
    pub fn hour_of_day(self) -> usize {
        ((self.0 / SECONDS_PER_HOUR).floor() as i64).rem_euclid(24) as usize
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total = self.0.max(0.0).floor() as u64;
        let days = total / 86400;
        let remaining = total % 86400;
        let hours = remaining / 3600;
        let mins = (remaining % 3600) / 60;
        let secs = remaining % 60;
        write!(f, "DAY{} {:02}:{:02}:{:02}", days + 1, hours, mins, secs)
    }
}

impl Add<f64> for Time {
    type Output = Self;

    fn add(self, rhs: f64) -> Self::Output {
        Time(self.0 + rhs)
    }
}

impl Sub<Time> for Time {
    type Output = f64;

    fn sub(self, rhs: Time) -> Self::Output {
        self.0 - rhs.0
    }
}

impl AddAssign<f64> for Time {
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}
