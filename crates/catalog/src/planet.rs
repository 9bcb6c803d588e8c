//! Planets and their apparent (as-imaged) state.
//!
//! A `Planet` combines fixed orbital/physical elements with the apparent
//! state a direct imager sees: projected separation, star-planet delta
//! magnitude, working angle, and exozodiacal surface brightness. The
//! apparent state is time dependent and recomputed by
//! [`crate::Universe::propagate_system`].

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use units::{Angle, Length, Mass, Time};

use crate::star::Star;

/// A planet orbiting a catalog star.
///
/// Orbits are modeled as circular and inclined; the mean anomaly at mission
/// start fixes the orbital phase. This is enough to drive the time-varying
/// separation and brightness the scheduler reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// Index of the host star in the target catalog
    pub star_ind: usize,
    /// Planet mass
    pub mass: Mass,
    /// Planet radius
    pub radius: Length,
    /// Orbital semi-major axis
    pub semi_major_axis: Length,
    /// Orbital inclination (0 = face-on)
    pub inclination: Angle,
    /// Mean anomaly at mission start
    pub mean_anomaly_epoch: Angle,
    /// Geometric albedo
    pub albedo: f64,
    /// Exozodiacal surface brightness toward this planet (1/arcsec²)
    pub f_ez: f64,

    /// Apparent projected separation (time dependent)
    pub separation: Length,
    /// Apparent star-planet delta magnitude (time dependent)
    pub d_mag: f64,
    /// Apparent working angle (time dependent)
    pub wa: Angle,
}

impl Planet {
    /// Create a planet around `host`, with its apparent state evaluated at
    /// mission start.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        star_ind: usize,
        mass: Mass,
        radius: Length,
        semi_major_axis: Length,
        inclination: Angle,
        mean_anomaly_epoch: Angle,
        albedo: f64,
        f_ez: f64,
        host: &Star,
    ) -> Self {
        let mut planet = Self {
            star_ind,
            mass,
            radius,
            semi_major_axis,
            inclination,
            mean_anomaly_epoch,
            albedo,
            f_ez,
            separation: Length::zero(),
            d_mag: 0.0,
            wa: Angle::zero(),
        };
        planet.update_apparent_state(Time::zero(), host.mass, host.distance);
        planet
    }

    /// Keplerian orbital period around a host of mass `star_mass`.
    ///
    /// `T[yr] = sqrt(a[AU]³ / M[M☉])`, the same relation the planet
    /// generation side uses.
    pub fn orbital_period(&self, star_mass: Mass) -> Time {
        let a_au = self.semi_major_axis.to_au();
        let m_sun = star_mass.to_solar_masses();
        Time::from_years((a_au.powi(3) / m_sun).sqrt())
    }

    /// Recompute the apparent state at elapsed mission time `t_norm`.
    ///
    /// Circular orbit: the mean anomaly advances linearly and equals the
    /// true anomaly. The projected separation follows from the inclination,
    /// the delta magnitude from the Lambert phase function, and the working
    /// angle from the separation and the stellar distance.
    pub fn update_apparent_state(&mut self, t_norm: Time, star_mass: Mass, star_distance: Length) {
        let period = self.orbital_period(star_mass);
        let theta = self.mean_anomaly_epoch.to_radians() + 2.0 * PI * (t_norm / period);

        let sin_i = self.inclination.sin();
        let a_au = self.semi_major_axis.to_au();

        // Projected separation: s = a·sqrt(1 − sin²i·sin²θ)
        let s_au = a_au * (1.0 - (sin_i * theta.sin()).powi(2)).sqrt();
        self.separation = Length::from_au(s_au);

        // Phase angle: cos β = sin i · sin θ, β in [0, π]
        let beta = (sin_i * theta.sin()).clamp(-1.0, 1.0).acos();
        let flux_ratio =
            self.albedo * (self.radius.to_au() / a_au).powi(2) * lambert_phase(beta);
        self.d_mag = -2.5 * flux_ratio.log10();

        self.wa = Angle::from_radians((s_au / star_distance.to_au()).atan());
    }
}

/// Lambert phase function for a diffusely scattering sphere.
///
/// `Φ(β) = (sin β + (π − β)·cos β) / π`, with Φ(0) = 1 (full phase) and
/// Φ(π) = 0 (new phase).
pub fn lambert_phase(beta: f64) -> f64 {
    (beta.sin() + (PI - beta) * beta.cos()) / PI
}
