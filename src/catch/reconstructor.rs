use crate::{
    any::reconstructor::{ReconstructParams, Reconstructor},
    model::{
        judgment::{Judgment, JudgmentCounts},
        mode::GameMode,
    },
    util::float_ext::{clamp_count, FloatExt},
};

/// [`Reconstructor`] for osu!catch.
///
/// Misses are attributed to droplets first, then to fruits. Fruits and
/// droplets are otherwise all caught and the amount of caught tiny droplets
/// is solved for such that the target accuracy is met.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CatchReconstructor;

impl Reconstructor for CatchReconstructor {
    fn mode(&self) -> GameMode {
        GameMode::Catch
    }

    fn reconstruct(&self, params: &ReconstructParams) -> JudgmentCounts {
        let census = &params.census;

        let max_fruits = i64::from(census.max_fruits);
        let max_droplets = i64::from(census.max_large_ticks) - i64::from(census.max_small_ticks);
        let max_tiny_droplets = i64::from(census.max_small_ticks);
        let misses = i64::from(params.misses);

        let n_droplets = (max_droplets - misses).max(0);
        let missed_droplets = max_droplets - n_droplets;
        let missed_fruits = misses - missed_droplets;
        let n_fruits = (max_fruits - missed_fruits).max(0);

        let total_objects = max_fruits + max_droplets + max_tiny_droplets;
        let target_hits = (params.accuracy / 100.0 * total_objects as f64).round_count();

        let n_tiny_droplets = target_hits
            .saturating_sub(n_fruits + n_droplets)
            .clamp(0, max_tiny_droplets.max(0));
        let n_tiny_droplet_misses = max_tiny_droplets - n_tiny_droplets;

        JudgmentCounts::new(GameMode::Catch)
            .with(Judgment::Great, clamp_count(n_fruits))
            .with(Judgment::LargeTickHit, clamp_count(n_droplets))
            .with(Judgment::SmallTickHit, clamp_count(n_tiny_droplets))
            .with(Judgment::SmallTickMiss, clamp_count(n_tiny_droplet_misses))
            .with(Judgment::Miss, params.misses)
    }
}
