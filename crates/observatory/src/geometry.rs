//! Spacecraft geometry: orbit, pointing, and keepout.

use catalog::{Star, TargetCatalog};
use nalgebra::Vector3;
use std::f64::consts::PI;
use units::{Angle, Length, Time};

/// Provider of spacecraft position and pointing-constraint checks.
///
/// Implementations supply where the spacecraft is, where a target lies on
/// the sky, and whether pointing at it violates an angular-exclusion
/// (keepout) constraint at a given time.
pub trait GeometryModel {
    /// Heliocentric spacecraft position at absolute time `t_abs`, in AU.
    fn orbit(&self, t_abs: Time) -> Vector3<f64>;

    /// Unit vector toward `star` as seen from the spacecraft at `t_abs`.
    fn star_direction(&self, star: &Star, t_abs: Time) -> Vector3<f64>;

    /// For each star index, true when pointing at it from `r_sc` at `t_abs`
    /// satisfies the `keepout_angle` exclusion cone.
    fn keepout(
        &self,
        catalog: &TargetCatalog,
        star_inds: &[usize],
        t_abs: Time,
        r_sc: Vector3<f64>,
        keepout_angle: Angle,
    ) -> Vec<bool>;
}

/// Spacecraft on a circular heliocentric orbit with a solar keepout cone.
///
/// The keepout test rejects targets whose line of sight passes within
/// `keepout_angle` of the Sun as seen from the spacecraft. Stellar
/// parallax over the orbit is negligible at survey distances, so the
/// star direction is the catalog direction.
#[derive(Debug, Clone)]
pub struct SolarOrbitGeometry {
    /// Orbit radius
    pub orbit_radius: Length,
    /// Orbital period
    pub period: Time,
    /// Orbital phase at mission start, radians
    pub phase0: f64,
}

impl SolarOrbitGeometry {
    /// Earth-trailing orbit at 1 AU with a one-year period.
    pub fn earth_trailing() -> Self {
        Self {
            orbit_radius: Length::from_au(1.0),
            period: Time::from_years(1.0),
            phase0: 0.0,
        }
    }
}

impl GeometryModel for SolarOrbitGeometry {
    fn orbit(&self, t_abs: Time) -> Vector3<f64> {
        let theta = self.phase0 + 2.0 * PI * (t_abs / self.period);
        let r = self.orbit_radius.to_au();
        Vector3::new(r * theta.cos(), r * theta.sin(), 0.0)
    }

    fn star_direction(&self, star: &Star, _t_abs: Time) -> Vector3<f64> {
        star.direction
    }

    fn keepout(
        &self,
        catalog: &TargetCatalog,
        star_inds: &[usize],
        t_abs: Time,
        r_sc: Vector3<f64>,
        keepout_angle: Angle,
    ) -> Vec<bool> {
        let sun_dir = if r_sc.norm() > 0.0 {
            -r_sc.normalize()
        } else {
            return vec![true; star_inds.len()];
        };

        star_inds
            .iter()
            .map(|&ind| {
                let look = self.star_direction(catalog.star(ind), t_abs);
                let sun_angle = look.dot(&sun_dir).clamp(-1.0, 1.0).acos();
                sun_angle >= keepout_angle.to_radians()
            })
            .collect()
    }
}

/// Angular separation between two unit direction vectors.
///
/// Used for occulter slew planning; NaN-safe in the way the slew
/// calculation needs (identical directions give exactly zero).
pub fn angular_separation(u1: &Vector3<f64>, u2: &Vector3<f64>) -> Angle {
    Angle::from_radians(u1.dot(u2).clamp(-1.0, 1.0).acos())
}
