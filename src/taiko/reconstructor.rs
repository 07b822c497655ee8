use crate::{
    any::reconstructor::{ReconstructParams, Reconstructor},
    model::{
        judgment::{Judgment, JudgmentCounts},
        mode::GameMode,
    },
    util::float_ext::{clamp_count, FloatExt},
};

/// [`Reconstructor`] for osu!taiko.
///
/// A great is worth twice an ok so the accuracy over the non-missed objects
/// determines the split directly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaikoReconstructor;

impl Reconstructor for TaikoReconstructor {
    fn mode(&self) -> GameMode {
        GameMode::Taiko
    }

    fn reconstruct(&self, params: &ReconstructParams) -> JudgmentCounts {
        let counts = JudgmentCounts::new(GameMode::Taiko).with(Judgment::Miss, params.misses);
        let relevant = i64::from(params.census.total) - i64::from(params.misses);

        if relevant <= 0 {
            return counts;
        }

        let acc = params.accuracy / 100.0;
        let n300 = ((2.0 * acc - 1.0) * relevant as f64)
            .round_count()
            .clamp(0, relevant);

        counts
            .with(Judgment::Great, clamp_count(n300))
            .with(Judgment::Ok, clamp_count(relevant - n300))
    }
}
