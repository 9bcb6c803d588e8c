//! Detection completeness.

use catalog::TargetCatalog;
use units::Time;

/// Provider of per-target detection completeness: the probability that a
/// planet drawn from the population would be observable at this visit.
pub trait CompletenessModel {
    /// Baseline (first-visit) completeness for every catalog target.
    fn baseline(&self, catalog: &TargetCatalog) -> Vec<f64>;

    /// Updated completeness for the given targets at elapsed mission time
    /// `t_norm`, reflecting what earlier visits have already ruled out.
    fn update(&self, catalog: &TargetCatalog, star_inds: &[usize], t_norm: Time) -> Vec<f64>;
}

/// Completeness frozen at the catalog baseline.
///
/// `update` returns the baseline values; a dynamic completeness model
/// (orbit-integrating, visit-aware) plugs in behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct StaticCompleteness;

impl CompletenessModel for StaticCompleteness {
    fn baseline(&self, catalog: &TargetCatalog) -> Vec<f64> {
        catalog.baseline_completeness()
    }

    fn update(&self, catalog: &TargetCatalog, star_inds: &[usize], _t_norm: Time) -> Vec<f64> {
        star_inds.iter().map(|&i| catalog.star(i).comp0).collect()
    }
}
