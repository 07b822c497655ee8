use crate::{
    any::reconstructor::{ReconstructParams, Reconstructor},
    model::{
        judgment::{Judgment, JudgmentCounts},
        mode::GameMode,
    },
    util::float_ext::{clamp_count, FloatExt},
};

/// [`Reconstructor`] for osu!mania.
///
/// The accuracy selects a band of two adjacent judgments and the non-missed
/// objects are split between them by linear interpolation within the band.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManiaReconstructor;

struct Band {
    lower_bound: f64,
    upper_bound: f64,
    width: f64,
    higher: Judgment,
    lower: Judgment,
}

impl Band {
    const fn new(
        lower_bound: f64,
        upper_bound: f64,
        width: f64,
        higher: Judgment,
        lower: Judgment,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            width,
            higher,
            lower,
        }
    }

    /// Share of the higher judgment at accuracy `acc`.
    fn interpolate(&self, acc: f64) -> f64 {
        1.0 - (self.upper_bound - acc) / self.width
    }
}

// Widths must stay literal, `upper_bound - lower_bound` is off in the last bit
const BANDS: [Band; 4] = [
    Band::new(0.96, 1.0, 0.04, Judgment::Perfect, Judgment::Great),
    Band::new(0.90, 0.96, 0.06, Judgment::Great, Judgment::Good),
    Band::new(0.80, 0.90, 0.10, Judgment::Good, Judgment::Ok),
    Band::new(0.60, 0.80, 0.20, Judgment::Ok, Judgment::Meh),
];

impl Reconstructor for ManiaReconstructor {
    fn mode(&self) -> GameMode {
        GameMode::Mania
    }

    fn reconstruct(&self, params: &ReconstructParams) -> JudgmentCounts {
        let mut counts = JudgmentCounts::new(GameMode::Mania).with(Judgment::Miss, params.misses);
        let relevant = i64::from(params.census.total) - i64::from(params.misses);

        if relevant <= 0 {
            return counts;
        }

        let acc = params.accuracy / 100.0;

        let Some(band) = BANDS.iter().find(|band| acc >= band.lower_bound) else {
            counts.set(Judgment::Meh, clamp_count(relevant));

            return counts;
        };

        let n_higher = (band.interpolate(acc) * relevant as f64)
            .round_count()
            .clamp(0, relevant);

        counts.set(band.higher, clamp_count(n_higher));
        counts.set(band.lower, clamp_count(relevant - n_higher));

        counts
    }
}
