use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    any::ScoreContext,
    error::CalculateError,
    model::{census::ObjectCensus, mode::GameMode, mods::ModCatalogue, mods::ModSelection},
};

/// [`ScoringEngine`] backed by `rosu-pp`.
pub mod rosu;

/// The collaborator that decodes charts and computes difficulty and
/// performance.
///
/// Everything but [`ScoringEngine::decode`] operates on a chart that has
/// been converted to the requested mode via [`ScoringEngine::convert`].
pub trait ScoringEngine {
    /// A decoded chart.
    type Chart;

    /// The result of a difficulty calculation.
    type Attributes: DifficultyValues;

    /// Decode a chart from its raw bytes.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Chart, EngineError>;

    /// Convert the chart to `mode` in-place.
    ///
    /// A chart that already is of `mode` must be left untouched.
    fn convert(
        &self,
        chart: &mut Self::Chart,
        mode: GameMode,
        mods: &ModSelection,
    ) -> Result<(), EngineError>;

    /// The mods of `mode`'s ruleset.
    fn available_mods(&self, mode: GameMode) -> ModCatalogue {
        ModCatalogue::for_mode(mode)
    }

    /// Calculate the difficulty of a converted chart.
    fn difficulty(
        &self,
        chart: &Self::Chart,
        mode: GameMode,
        mods: &ModSelection,
    ) -> Result<Self::Attributes, EngineError>;

    /// Count the objects of a converted chart.
    ///
    /// The difficulty attributes are passed along for engines that already
    /// counted objects during the difficulty calculation.
    fn census(&self, chart: &Self::Chart, mode: GameMode, attrs: &Self::Attributes)
        -> ObjectCensus;

    /// Calculate the performance of a score.
    fn performance(&self, score: ScoreContext, attrs: Self::Attributes) -> Result<f64, EngineError>;

    /// Best-effort extraction of the chart's metadata.
    fn metadata(&self, bytes: &[u8]) -> Option<ChartMetadata> {
        let _ = bytes;

        None
    }
}

/// Values that every difficulty calculation provides.
pub trait DifficultyValues {
    /// The final star rating.
    fn stars(&self) -> f64;

    /// The maximum achievable combo.
    fn max_combo(&self) -> u32;
}

/// All the ways a [`ScoringEngine`] can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid chart")]
    Decode(#[source] io::Error),
    #[error("chart was flagged as suspicious: {0}")]
    Suspicious(String),
    #[error("cannot convert {from:?} chart to {to:?}")]
    Conversion { from: GameMode, to: GameMode },
    #[error("calculation failed: {0}")]
    Calculation(String),
    #[error("engine panicked: {0}")]
    Panic(String),
}

/// Where to read a chart from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSource {
    /// Path to a `.osu` file.
    Path(PathBuf),
    /// Content of a `.osu` file.
    Bytes(Vec<u8>),
}

impl ChartSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Read the chart's bytes.
    ///
    /// The file handle is released before returning, regardless of the
    /// outcome.
    pub(crate) fn load(&self) -> Result<Vec<u8>, CalculateError> {
        match self {
            Self::Path(path) => read_file(path).map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    CalculateError::ChartNotFound { path: path.clone() }
                } else {
                    CalculateError::Io(err)
                }
            }),
            Self::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    Ok(bytes)
}

/// Descriptive information about a chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub title: String,
    pub artist: String,
    pub version: String,
    pub creator: String,
}
