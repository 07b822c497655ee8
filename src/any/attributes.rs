use std::fmt;

use serde::Serialize;

use crate::{
    engine::ChartMetadata,
    error::{CalculateError, ErrorKind},
    model::{
        judgment::JudgmentCounts,
        mode::{serialize_mode, GameMode},
        mods::{ModSelection, ModWarning},
        statistics::HitResultSource,
    },
};

/// Everything a [`ScoringEngine`] needs to know about a score.
///
/// [`RosuEngine`] ignores `accuracy` and `legacy_total_score`; `rosu-pp`
/// derives the accuracy from the judgments.
///
/// [`ScoringEngine`]: crate::engine::ScoringEngine
/// [`RosuEngine`]: crate::engine::rosu::RosuEngine
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreContext {
    pub mode: GameMode,
    /// Accuracy between `0.0` and `1.0`.
    pub accuracy: f64,
    /// The combo of the score.
    pub max_combo: u32,
    pub misses: u32,
    pub judgments: JudgmentCounts,
    pub mods: ModSelection,
    /// Whether the score was set on stable, i.e. it has a legacy total score.
    pub legacy_score_mode: bool,
    pub legacy_total_score: Option<u32>,
}

/// A successfully calculated score.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreAttributes {
    #[serde(serialize_with = "serialize_mode")]
    pub mode: GameMode,
    /// The star rating of the chart with the selected mods.
    pub stars: f64,
    /// The performance points of the score.
    pub pp: f64,
    /// The maximum combo of the chart as reported by the engine.
    pub max_combo: u32,
    /// The combo that was used for the calculation.
    pub combo: u32,
    /// The judgments that were used for the calculation.
    pub judgments: JudgmentCounts,
    /// Whether `judgments` were provided or reconstructed.
    pub source: HitResultSource,
    pub mods: ModSelection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoreWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChartMetadata>,
}

/// Something questionable about the input that did not prevent the
/// calculation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreWarning {
    /// A mod was dropped.
    Mod(ModWarning),
    /// Explicit statistics were used but the provided accuracy disagrees
    /// with them. Both values are in percent.
    AccuracyMismatch { given: f64, implied: f64 },
}

impl From<ModWarning> for ScoreWarning {
    fn from(warning: ModWarning) -> Self {
        Self::Mod(warning)
    }
}

impl fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mod(warning) => warning.fmt(f),
            Self::AccuracyMismatch { given, implied } => write!(
                f,
                "accuracy {given:.2}% was ignored in favor of statistics implying {implied:.2}%"
            ),
        }
    }
}

/// The result of [`Calculator::calculate_outcome`]: either attributes or a
/// categorized error message, never both.
///
/// [`Calculator::calculate_outcome`]: crate::Calculator::calculate_outcome
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Success(ScoreAttributes),
    Failure { kind: ErrorKind, message: String },
}

impl CalculationOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The attributes of a successful calculation.
    pub const fn attributes(&self) -> Option<&ScoreAttributes> {
        match self {
            Self::Success(attrs) => Some(attrs),
            Self::Failure { .. } => None,
        }
    }

    /// The error kind of a failed calculation.
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<Result<ScoreAttributes, CalculateError>> for CalculationOutcome {
    fn from(res: Result<ScoreAttributes, CalculateError>) -> Self {
        match res {
            Ok(attrs) => Self::Success(attrs),
            Err(err) => Self::Failure {
                kind: err.kind(),
                message: err.full_message(),
            },
        }
    }
}
