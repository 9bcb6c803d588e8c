use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub(crate) const HOURS_PER_DAY: f64 = 24.0;
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A physical time quantity using f64 precision.
///
/// The `Time` struct represents time with days as the base unit,
/// which is natural for mission planning and orbital timescales.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// // Create times in different units
/// let integration = Time::from_days(1.0);
/// let mission_life = Time::from_years(6.0);
/// let revisit_window = Time::from_weeks(1.0);
///
/// // Convert between units
/// let days = mission_life.to_days();
/// let hours = integration.to_hours();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Days

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in days.
    pub fn from_days(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in weeks.
    pub fn from_weeks(value: f64) -> Self {
        Self(value * DAYS_PER_WEEK)
    }

    /// Creates a new `Time` from a value in Julian years.
    pub fn from_years(value: f64) -> Self {
        Self(value * DAYS_PER_YEAR)
    }

    /// Creates a new `Time` from a value in hours.
    pub fn from_hours(value: f64) -> Self {
        Self(value / HOURS_PER_DAY)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_DAY)
    }

    /// Returns the time in days.
    pub fn to_days(&self) -> f64 {
        self.0
    }

    /// Returns the time in weeks.
    pub fn to_weeks(&self) -> f64 {
        self.0 / DAYS_PER_WEEK
    }

    /// Returns the time in Julian years.
    pub fn to_years(&self) -> f64 {
        self.0 / DAYS_PER_YEAR
    }

    /// Converts the time to hours.
    pub fn to_hours(&self) -> f64 {
        self.0 * HOURS_PER_DAY
    }

    /// Converts the time to seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_DAY
    }

    /// True when the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// True when the value is finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Absolute difference between two times.
    pub fn abs_diff(&self, other: Time) -> Time {
        Time((self.0 - other.0).abs())
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}

/// Division of Time by Time returns a dimensionless ratio
impl Div for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Time (commutative multiplication)
impl Mul<Time> for f64 {
    type Output = Time;

    fn mul(self, rhs: Time) -> Time {
        rhs * self
    }
}
