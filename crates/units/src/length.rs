use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const AU_TO_M: f64 = 1.496e11;
pub const AU_TO_KM: f64 = 1.496e8;
pub const AU_TO_EARTH_RADIUS: f64 = 23_481.4;

/// Parsec in AU: 1 pc = 648000/π AU
pub const PARSEC_TO_AU: f64 = 206_264.806;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with astronomical units (AU)
/// as the base unit. This is the natural choice for planetary-system scales;
/// stellar distances are expressed in parsecs on top of the same base.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// // Create lengths using different units
/// let earth_orbit = Length::from_au(1.0);
/// let star_distance = Length::from_parsecs(10.0);
///
/// // Convert between units
/// let orbit_in_km = earth_orbit.to_km();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: AU

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in parsecs.
    pub fn from_parsecs(value: f64) -> Self {
        Self(value * PARSEC_TO_AU)
    }

    /// Creates a new `Length` from a value in Earth radii.
    pub fn from_earth_radii(value: f64) -> Self {
        Self(value / AU_TO_EARTH_RADIUS)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value / AU_TO_KM)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_meters(value: f64) -> Self {
        Self(value / AU_TO_M)
    }

    /// Returns the length in astronomical units.
    pub fn to_au(&self) -> f64 {
        self.0
    }

    /// Returns the length in parsecs.
    pub fn to_parsecs(&self) -> f64 {
        self.0 / PARSEC_TO_AU
    }

    /// Returns the length in Earth radii.
    pub fn to_earth_radii(&self) -> f64 {
        self.0 * AU_TO_EARTH_RADIUS
    }

    /// Converts the length to kilometers.
    pub fn to_km(&self) -> f64 {
        self.0 * AU_TO_KM
    }

    /// Converts the length to meters.
    pub fn to_meters(&self) -> f64 {
        self.0 * AU_TO_M
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
