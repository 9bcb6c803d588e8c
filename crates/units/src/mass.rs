use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const EARTH_MASS_KG: f64 = 5.9722e24;
pub const SOLAR_MASS_KG: f64 = 1.98892e30;

/// Jupiter mass in Earth masses: 1 M_J = 317.83 M⊕
pub const JUPITER_TO_EARTH_MASSES: f64 = 317.83;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct represents mass values with kilograms as the base unit,
/// so that spacecraft masses (propellant budgets) and astronomical masses
/// (stars, planets) share one representation.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let star = Mass::from_solar_masses(1.0);
/// let planet = Mass::from_earth_masses(1.0);
/// let starshade = Mass::from_kg(6000.0);
///
/// let ratio = planet / star;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: kg

impl Mass {
    /// Creates a zero mass value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Mass` from a value in kilograms.
    pub fn from_kg(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in Earth masses.
    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_KG)
    }

    /// Creates a new `Mass` from a value in Jupiter masses.
    pub fn from_jupiter_masses(value: f64) -> Self {
        Self(value * JUPITER_TO_EARTH_MASSES * EARTH_MASS_KG)
    }

    /// Creates a new `Mass` from a value in solar masses.
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_KG)
    }

    /// Returns the mass in kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0
    }

    /// Returns the mass in Earth masses.
    pub fn to_earth_masses(&self) -> f64 {
        self.0 / EARTH_MASS_KG
    }

    /// Returns the mass in Jupiter masses.
    pub fn to_jupiter_masses(&self) -> f64 {
        self.0 / (JUPITER_TO_EARTH_MASSES * EARTH_MASS_KG)
    }

    /// Returns the mass in solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0 / SOLAR_MASS_KG
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Mass (commutative multiplication)
impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}
