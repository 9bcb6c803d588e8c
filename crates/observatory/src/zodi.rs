//! Zodiacal and exozodiacal surface brightness.

use catalog::Star;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Provider of local and exo-zodiacal surface brightness, in units of
/// zero-magnitude stellar flux per arcsec².
pub trait BrightnessModel {
    /// Local zodiacal brightness toward `star` from spacecraft position
    /// `r_sc` (AU). Time variation enters through `r_sc`.
    fn local_zodi(&self, star: &Star, r_sc: Vector3<f64>) -> f64;

    /// Exozodiacal brightness floor used when a planet-specific value is
    /// not available.
    fn exozodi_floor(&self) -> f64;
}

/// Local zodi falling off with heliocentric distance squared, dimming
/// toward the ecliptic poles; constant exozodi floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InverseSquareZodi {
    /// In-ecliptic zodi brightness at 1 AU (1/arcsec²)
    pub f_z0: f64,
    /// Exozodi floor (1/arcsec²)
    pub f_ez0: f64,
}

impl Default for InverseSquareZodi {
    fn default() -> Self {
        Self {
            f_z0: 1e-8,
            f_ez0: 1.5e-7,
        }
    }
}

impl BrightnessModel for InverseSquareZodi {
    fn local_zodi(&self, star: &Star, r_sc: Vector3<f64>) -> f64 {
        let r2 = r_sc.norm_squared().max(1e-6);
        // |z-component| of the unit direction is |sin(ecliptic latitude)|
        let pole_dimming = 1.0 - 0.6 * star.direction.z.abs();
        self.f_z0 * pole_dimming / r2
    }

    fn exozodi_floor(&self) -> f64 {
        self.f_ez0
    }
}
