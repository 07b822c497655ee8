use crate::{
    catch::CatchReconstructor,
    mania::ManiaReconstructor,
    model::{census::ObjectCensus, judgment::JudgmentCounts, mode::GameMode},
    osu::OsuReconstructor,
    taiko::TaikoReconstructor,
};

/// Input of a [`Reconstructor`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ReconstructParams {
    /// Accuracy in percent, i.e. between `0.0` and `100.0`.
    pub accuracy: f64,
    pub census: ObjectCensus,
    pub misses: u32,
}

/// Inverts an accuracy into judgment counts for a single mode.
///
/// Implementations never fail; infeasible inputs are clamped.
pub trait Reconstructor: Send + Sync {
    /// The mode whose judgments are produced.
    fn mode(&self) -> GameMode;

    /// Produce judgment counts that approximately yield the target accuracy.
    fn reconstruct(&self, params: &ReconstructParams) -> JudgmentCounts;
}

/// The [`Reconstructor`] of the given mode.
pub fn reconstructor(mode: GameMode) -> &'static dyn Reconstructor {
    match mode {
        GameMode::Osu => &OsuReconstructor,
        GameMode::Taiko => &TaikoReconstructor,
        GameMode::Catch => &CatchReconstructor,
        GameMode::Mania => &ManiaReconstructor,
    }
}
