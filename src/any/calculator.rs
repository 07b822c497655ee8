use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use serde::Deserialize;

use crate::{
    any::{
        attributes::{CalculationOutcome, ScoreAttributes, ScoreContext, ScoreWarning},
        reconstructor::{reconstructor, ReconstructParams},
    },
    engine::{ChartSource, DifficultyValues, EngineError, ScoringEngine},
    error::CalculateError,
    model::{
        mode::{GameMode, GameModeExt},
        mods::{self, NormalizedMods, RawMod},
        statistics::{self, PartialStatistics},
    },
};

/// Explicit statistics whose accuracy differs from the provided accuracy by
/// more than this many percentage points produce a warning.
const ACCURACY_MISMATCH_THRESHOLD: f64 = 0.5;

/// A score of which only summary values, and optionally some judgments, are
/// known.
///
/// # Example
///
/// ```
/// use rosu_hitstats::{ChartSource, RawMod, ScoreRequest};
///
/// let request = ScoreRequest::new(ChartSource::path("./maps/2785319.osu"), 0)
///     .mods(vec![RawMod::from("HD"), RawMod::from("hr")])
///     .accuracy(98.2)
///     .misses(1);
///
/// assert_eq!(request.mode, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ScoreRequest {
    pub chart: ChartSource,
    /// The numeric mode id, `0` to `3`.
    pub mode: u8,
    #[serde(default)]
    pub mods: Vec<RawMod>,
    /// Accuracy in percent. Assumed to be `100.0` if not specified.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// The score's combo. Defaults to the chart's max combo.
    #[serde(default)]
    pub combo: Option<u32>,
    #[serde(default)]
    pub misses: u32,
    /// The legacy total score of scores set on stable.
    #[serde(default)]
    pub legacy_total_score: Option<u32>,
    /// Explicit judgments. If any of them is positive, they take precedence
    /// over `accuracy` and `misses`.
    #[serde(default)]
    pub statistics: Option<PartialStatistics>,
}

impl ScoreRequest {
    /// Create a new request for a chart in the given mode.
    pub const fn new(chart: ChartSource, mode: u8) -> Self {
        Self {
            chart,
            mode,
            mods: Vec::new(),
            accuracy: None,
            combo: None,
            misses: 0,
            legacy_total_score: None,
            statistics: None,
        }
    }

    /// Specify mods as bare acronyms, records or typed mods.
    ///
    /// Entries that cannot be resolved are skipped and show up in
    /// [`ScoreAttributes::warnings`].
    #[must_use]
    pub fn mods(mut self, mods: impl Into<Vec<RawMod>>) -> Self {
        self.mods = mods.into();

        self
    }

    /// Specify the accuracy in percent, i.e. between `0.0` and `100.0`.
    #[must_use]
    pub fn accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);

        self
    }

    /// Specify the combo. Defaults to the chart's max combo.
    #[must_use]
    pub fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of misses.
    #[must_use]
    pub fn misses(mut self, misses: u32) -> Self {
        self.misses = misses;

        self
    }

    /// Specify the legacy total score of a score set on stable.
    ///
    /// A positive value switches the engine to legacy scoring.
    #[must_use]
    pub fn legacy_total_score(mut self, legacy_total_score: u32) -> Self {
        self.legacy_total_score = Some(legacy_total_score);

        self
    }

    /// Specify explicit judgments.
    #[must_use]
    pub fn statistics(mut self, statistics: impl Into<PartialStatistics>) -> Self {
        self.statistics = Some(statistics.into());

        self
    }
}

/// Turns [`ScoreRequest`]s into [`ScoreAttributes`] with the help of a
/// [`ScoringEngine`].
///
/// The calculator holds no state besides the engine so a single instance
/// can serve any amount of requests, also concurrently if the engine allows
/// it.
#[derive(Clone, Debug, Default)]
pub struct Calculator<E> {
    engine: E,
}

impl<E: ScoringEngine> Calculator<E> {
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Calculate the difficulty and performance of a score.
    ///
    /// Never panics; engine panics are reported as
    /// [`ErrorKind::EngineFailure`].
    ///
    /// [`ErrorKind::EngineFailure`]: crate::ErrorKind::EngineFailure
    pub fn calculate(&self, request: &ScoreRequest) -> Result<ScoreAttributes, CalculateError> {
        let mode = GameMode::from_id(request.mode).ok_or(CalculateError::InvalidMode(request.mode))?;

        let bytes = request.chart.load()?;
        let mut chart = guarded(|| self.engine.decode(&bytes)).map_err(CalculateError::Decode)?;

        let catalogue = self.engine.available_mods(mode);
        let NormalizedMods {
            selection: mods,
            warnings: mod_warnings,
        } = mods::normalize(&request.mods, &catalogue);

        let mut warnings: Vec<ScoreWarning> = mod_warnings.into_iter().map(ScoreWarning::from).collect();

        guarded(|| self.engine.convert(&mut chart, mode, &mods)).map_err(CalculateError::Engine)?;

        let attrs = guarded(|| self.engine.difficulty(&chart, mode, &mods))
            .map_err(CalculateError::Engine)?;

        let census = guarded(|| Ok(self.engine.census(&chart, mode, &attrs)))
            .map_err(CalculateError::Engine)?;

        tracing::debug!(?mode, ?census, %mods, "Counted objects");

        let resolved = statistics::resolve(request.statistics.as_ref(), request.misses);
        let source = resolved.source();

        let judgments = match resolved.explicit {
            Some(statistics) => statistics.judgments(mode),
            None => {
                let params = ReconstructParams {
                    accuracy: request.accuracy.unwrap_or(100.0),
                    census,
                    misses: resolved.misses,
                };

                reconstructor(mode).reconstruct(&params)
            }
        };

        let implied = judgments.accuracy(mode) * 100.0;

        let accuracy = match (resolved.explicit, request.accuracy) {
            (Some(_), Some(given)) => {
                if (given - implied).abs() > ACCURACY_MISMATCH_THRESHOLD {
                    tracing::warn!(given, implied, "Provided accuracy disagrees with statistics");
                    warnings.push(ScoreWarning::AccuracyMismatch { given, implied });
                }

                given
            }
            (Some(_), None) => implied,
            (None, given) => given.unwrap_or(100.0),
        };

        let max_combo = attrs.max_combo();
        let combo = request.combo.unwrap_or(max_combo);
        let stars = attrs.stars();

        let score = ScoreContext {
            mode,
            accuracy: normalize_accuracy(accuracy),
            max_combo: combo,
            misses: resolved.misses,
            judgments: judgments.clone(),
            mods: mods.clone(),
            legacy_score_mode: request.legacy_total_score.is_some_and(|score| score > 0),
            legacy_total_score: request.legacy_total_score,
        };

        let pp = guarded(|| self.engine.performance(score, attrs)).map_err(CalculateError::Engine)?;

        let metadata = panic::catch_unwind(AssertUnwindSafe(|| self.engine.metadata(&bytes)))
            .ok()
            .flatten();

        Ok(ScoreAttributes {
            mode,
            stars,
            pp,
            max_combo,
            combo,
            judgments,
            source,
            mods,
            warnings,
            metadata,
        })
    }

    /// Same as [`Calculator::calculate`] but errors are folded into the
    /// returned [`CalculationOutcome`].
    pub fn calculate_outcome(&self, request: &ScoreRequest) -> CalculationOutcome {
        let res = self.calculate(request);

        if let Err(ref err) = res {
            tracing::warn!(kind = %err.kind(), error = %err.full_message(), "Calculation failed");
        }

        CalculationOutcome::from(res)
    }
}

/// Convert a percentage into `0.0..=1.0`.
fn normalize_accuracy(accuracy: f64) -> f64 {
    if accuracy.is_finite() {
        (accuracy / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Run an engine call, turning panics into errors.
fn guarded<T>(f: impl FnOnce() -> Result<T, EngineError>) -> Result<T, EngineError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(EngineError::Panic(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_owned()
    }
}
