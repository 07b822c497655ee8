use std::{fmt, io, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// All the ways a calculation can fail.
///
/// Problematic mods are not errors; they are reported as warnings instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CalculateError {
    #[error("invalid mode {0}, expected 0 (osu), 1 (taiko), 2 (catch) or 3 (mania)")]
    InvalidMode(u8),
    #[error("chart not found at `{}`", path.display())]
    ChartNotFound { path: PathBuf },
    #[error("failed to read chart")]
    Io(#[source] io::Error),
    #[error("failed to decode chart")]
    Decode(#[source] EngineError),
    #[error("scoring engine failed")]
    Engine(#[source] EngineError),
}

impl CalculateError {
    /// The category of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMode(_) => ErrorKind::InvalidMode,
            Self::ChartNotFound { .. } => ErrorKind::ChartNotFound,
            Self::Io(_) | Self::Decode(_) => ErrorKind::DecodeFailure,
            Self::Engine(_) => ErrorKind::EngineFailure,
        }
    }

    /// The error message including all of its sources, e.g.
    /// `"scoring engine failed: chart was flagged as suspicious: ..."`.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);

        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }

        message
    }
}

/// Category of a [`CalculateError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidMode,
    ChartNotFound,
    DecodeFailure,
    EngineFailure,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidMode => "invalid-mode",
            Self::ChartNotFound => "chart-not-found",
            Self::DecodeFailure => "decode-failure",
            Self::EngineFailure => "engine-failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_kebab_case() {
        let kinds = [
            ErrorKind::InvalidMode,
            ErrorKind::ChartNotFound,
            ErrorKind::DecodeFailure,
            ErrorKind::EngineFailure,
        ];

        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn full_message_includes_sources() {
        let err = CalculateError::Engine(EngineError::Calculation("no attributes".to_owned()));

        assert_eq!(err.kind(), ErrorKind::EngineFailure);
        assert_eq!(
            err.full_message(),
            "scoring engine failed: calculation failed: no attributes"
        );
    }
}
