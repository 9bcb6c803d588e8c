use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Sub};

pub const DEGREES_PER_RADIAN: f64 = 180.0 / PI;
pub const ARCSEC_PER_RADIAN: f64 = 206_264.806;
pub const MAS_PER_RADIAN: f64 = ARCSEC_PER_RADIAN * 1_000.0;

/// A physical angle quantity using f64 precision.
///
/// The `Angle` struct represents angles with radians as the base unit.
/// Working angles of directly imaged planets are naturally expressed in
/// milliarcseconds (mas), keepout cones in degrees.
///
/// # Examples
///
/// ```rust
/// use units::Angle;
///
/// let keepout = Angle::from_degrees(45.0);
/// let inner_working_angle = Angle::from_mas(75.0);
///
/// let mas = inner_working_angle.to_mas();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Angle(f64); // Base unit: radians

impl Angle {
    /// Creates a zero angle value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Angle` from a value in radians.
    pub fn from_radians(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Angle` from a value in degrees.
    pub fn from_degrees(value: f64) -> Self {
        Self(value / DEGREES_PER_RADIAN)
    }

    /// Creates a new `Angle` from a value in arcseconds.
    pub fn from_arcsec(value: f64) -> Self {
        Self(value / ARCSEC_PER_RADIAN)
    }

    /// Creates a new `Angle` from a value in milliarcseconds.
    pub fn from_mas(value: f64) -> Self {
        Self(value / MAS_PER_RADIAN)
    }

    /// Returns the angle in radians.
    pub fn to_radians(&self) -> f64 {
        self.0
    }

    /// Returns the angle in degrees.
    pub fn to_degrees(&self) -> f64 {
        self.0 * DEGREES_PER_RADIAN
    }

    /// Returns the angle in arcseconds.
    pub fn to_arcsec(&self) -> f64 {
        self.0 * ARCSEC_PER_RADIAN
    }

    /// Returns the angle in milliarcseconds.
    pub fn to_mas(&self) -> f64 {
        self.0 * MAS_PER_RADIAN
    }

    /// Sine of the angle.
    pub fn sin(&self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle.
    pub fn cos(&self) -> f64 {
        self.0.cos()
    }

    /// Tangent of the angle.
    pub fn tan(&self) -> f64 {
        self.0.tan()
    }

    /// Smaller of two angles.
    pub fn min(self, other: Angle) -> Angle {
        Angle(self.0.min(other.0))
    }

    /// Larger of two angles.
    pub fn max(self, other: Angle) -> Angle {
        Angle(self.0.max(other.0))
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

/// Division of Angle by Angle returns a dimensionless ratio
impl Div for Angle {
    type Output = f64;

    fn div(self, rhs: Angle) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Angle (commutative multiplication)
impl Mul<Angle> for f64 {
    type Output = Angle;

    fn mul(self, rhs: Angle) -> Angle {
        rhs * self
    }
}
