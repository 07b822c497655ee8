use crate::{
    any::reconstructor::{ReconstructParams, Reconstructor},
    model::{
        judgment::{Judgment, JudgmentCounts},
        mode::GameMode,
    },
    util::float_ext::{clamp_count, FloatExt},
};

/// [`Reconstructor`] for osu!standard.
///
/// The accuracy is first re-normalized over the non-missed objects and then,
/// depending on how low that relative accuracy is, distributed over 100s and
/// 50s. Below an accuracy of 1/6 not even all-50s suffice so additional
/// objects are turned into misses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OsuReconstructor;

const ONE_SIXTH: f64 = 1.0 / 6.0;

impl Reconstructor for OsuReconstructor {
    fn mode(&self) -> GameMode {
        GameMode::Osu
    }

    fn reconstruct(&self, params: &ReconstructParams) -> JudgmentCounts {
        let total = i64::from(params.census.total);
        let mut misses = i64::from(params.misses);
        let relevant = total - misses;

        if relevant <= 0 {
            return JudgmentCounts::new(GameMode::Osu).with(Judgment::Miss, params.misses);
        }

        let acc = params.accuracy / 100.0;
        let rel_acc = (acc * total as f64 / relevant as f64).clamp(0.0, 1.0);
        let relevant_f = relevant as f64;

        let (n100, n50) = if rel_acc >= 0.25 {
            let ratio = (1.0 - (rel_acc - 0.25) / 0.75).powi(2);
            let c100 = 6.0 * relevant_f * (1.0 - rel_acc) / (5.0 * ratio + 4.0);
            let c50 = c100 * ratio;
            let n100 = c100.round_count();

            (n100, (c100 + c50).round_count() - n100)
        } else if rel_acc >= ONE_SIXTH {
            let c100 = 6.0 * relevant_f * rel_acc - relevant_f;
            let c50 = relevant_f - c100;
            let n100 = c100.round_count();

            (n100, (c100 + c50).round_count() - n100)
        } else {
            let n50 = (6.0 * relevant_f * rel_acc).round_count();

            // Objects that would require negative 100s become misses
            misses = total - n50;

            (0, n50)
        };

        let n300 = total - n100 - n50 - misses;

        JudgmentCounts::new(GameMode::Osu)
            .with(Judgment::Great, clamp_count(n300))
            .with(Judgment::Ok, clamp_count(n100))
            .with(Judgment::Meh, clamp_count(n50))
            .with(Judgment::Miss, clamp_count(misses))
    }
}
