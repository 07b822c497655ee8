use std::io;

use rosu_map::section::metadata::Metadata;
use rosu_mods::{GameMod, GameMods};
use rosu_pp::{
    any::{DifficultyAttributes, ScoreState},
    model::mods::GameMods as EngineMods,
    Beatmap, Difficulty, Performance,
};

use crate::{
    any::ScoreContext,
    engine::{ChartMetadata, DifficultyValues, EngineError, ScoringEngine},
    model::{
        census::ObjectCensus,
        judgment::{Judgment, JudgmentCounts},
        mode::{mods_mode, GameMode},
        mods::ModSelection,
    },
};

/// [`ScoringEngine`] that decodes charts with `rosu-map` and calculates
/// difficulty and performance with `rosu-pp`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RosuEngine {
    check_suspicion: bool,
}

impl RosuEngine {
    /// Create a new engine that rejects suspicious charts.
    pub const fn new() -> Self {
        Self {
            check_suspicion: true,
        }
    }

    /// Whether charts should be checked for suspicious content before
    /// calculating anything.
    ///
    /// Suspicious charts, e.g. ones with an absurd amount of objects, may
    /// take very long to calculate. Defaults to `true`.
    #[must_use]
    pub const fn check_suspicion(mut self, check_suspicion: bool) -> Self {
        self.check_suspicion = check_suspicion;

        self
    }
}

impl DifficultyValues for DifficultyAttributes {
    fn stars(&self) -> f64 {
        DifficultyAttributes::stars(self)
    }

    fn max_combo(&self) -> u32 {
        DifficultyAttributes::max_combo(self)
    }
}

impl ScoringEngine for RosuEngine {
    type Chart = Beatmap;
    type Attributes = DifficultyAttributes;

    fn decode(&self, bytes: &[u8]) -> Result<Beatmap, EngineError> {
        if !has_format_header(bytes) {
            return Err(EngineError::Decode(io::Error::new(
                io::ErrorKind::InvalidData,
                "missing `osu file format` header",
            )));
        }

        let map = Beatmap::from_bytes(bytes).map_err(EngineError::Decode)?;

        if self.check_suspicion {
            map.check_suspicion()
                .map_err(|sus| EngineError::Suspicious(sus.to_string()))?;
        }

        Ok(map)
    }

    fn convert(
        &self,
        map: &mut Beatmap,
        mode: GameMode,
        mods: &ModSelection,
    ) -> Result<(), EngineError> {
        if map.mode == mode {
            tracing::trace!(?mode, "Chart already in target mode");

            return Ok(());
        }

        let from = map.mode;

        map.convert_mut(mode, &engine_mods(mode, mods))
            .map_err(|_| EngineError::Conversion { from, to: mode })
    }

    fn difficulty(
        &self,
        map: &Beatmap,
        mode: GameMode,
        mods: &ModSelection,
    ) -> Result<DifficultyAttributes, EngineError> {
        let attrs = Difficulty::new()
            .mods(engine_mods(mode, mods))
            .calculate(map);

        let stars = attrs.stars();

        if !stars.is_finite() {
            return Err(EngineError::Calculation(format!(
                "non-finite star rating {stars}"
            )));
        }

        Ok(attrs)
    }

    fn census(&self, map: &Beatmap, _: GameMode, attrs: &DifficultyAttributes) -> ObjectCensus {
        let total = u32::try_from(map.hit_objects.len()).unwrap_or(u32::MAX);

        match attrs {
            // Juice streams are only generated during the difficulty
            // calculation so their nested objects are taken from there
            DifficultyAttributes::Catch(attrs) => ObjectCensus::from_catch_counts(
                total,
                attrs.n_fruits,
                attrs.n_droplets,
                attrs.n_tiny_droplets,
            ),
            _ => ObjectCensus::from_total(total),
        }
    }

    fn performance(
        &self,
        score: ScoreContext,
        attrs: DifficultyAttributes,
    ) -> Result<f64, EngineError> {
        let state = score_state(score.mode, score.max_combo, &score.judgments);

        let pp = Performance::new(attrs)
            .mods(engine_mods(score.mode, &score.mods))
            .lazer(!score.legacy_score_mode)
            .combo(state.max_combo)
            .n_geki(state.n_geki)
            .n_katu(state.n_katu)
            .n300(state.n300)
            .n100(state.n100)
            .n50(state.n50)
            .misses(state.misses)
            .calculate()
            .pp();

        if pp.is_finite() {
            Ok(pp)
        } else {
            Err(EngineError::Calculation(format!("non-finite pp {pp}")))
        }
    }

    fn metadata(&self, bytes: &[u8]) -> Option<ChartMetadata> {
        let metadata = rosu_map::from_bytes::<Metadata>(bytes).ok()?;

        Some(ChartMetadata {
            title: metadata.title,
            artist: metadata.artist,
            version: metadata.version,
            creator: metadata.creator,
        })
    }
}

fn engine_mods(mode: GameMode, mods: &ModSelection) -> EngineMods {
    let mode = mods_mode(mode);

    let mut game_mods = GameMods::new();

    for acronym in mods.iter() {
        game_mods.insert(GameMod::new(acronym, mode));
    }

    EngineMods::from(game_mods)
}

/// Map judgments onto `rosu-pp`'s hitresult slots.
fn score_state(mode: GameMode, max_combo: u32, judgments: &JudgmentCounts) -> ScoreState {
    let get = |judgment| judgments.get(judgment);

    let state = ScoreState {
        max_combo,
        misses: get(Judgment::Miss),
        ..ScoreState::default()
    };

    match mode {
        GameMode::Osu | GameMode::Taiko => ScoreState {
            n300: get(Judgment::Great),
            n100: get(Judgment::Ok),
            n50: get(Judgment::Meh),
            ..state
        },
        GameMode::Catch => ScoreState {
            n300: get(Judgment::Great),
            n100: get(Judgment::LargeTickHit),
            n50: get(Judgment::SmallTickHit),
            n_katu: get(Judgment::SmallTickMiss),
            ..state
        },
        GameMode::Mania => ScoreState {
            n_geki: get(Judgment::Perfect),
            n300: get(Judgment::Great),
            n_katu: get(Judgment::Good),
            n100: get(Judgment::Ok),
            n50: get(Judgment::Meh),
            ..state
        },
    }
}

const FORMAT_HEADER: &[u8] = b"osu file format v";

/// `rosu-map` decodes anything into an empty chart so the header is checked
/// up front.
fn has_format_header(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    bytes
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .is_some_and(|start| bytes[start..].starts_with(FORMAT_HEADER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_state_slots() {
        let judgments = JudgmentCounts::new(GameMode::Catch)
            .with(Judgment::Great, 100)
            .with(Judgment::LargeTickHit, 26)
            .with(Judgment::SmallTickHit, 20)
            .with(Judgment::SmallTickMiss, 3)
            .with(Judgment::Miss, 4);

        let state = score_state(GameMode::Catch, 120, &judgments);

        assert_eq!(state.max_combo, 120);
        assert_eq!(
            [state.n300, state.n100, state.n50, state.n_katu, state.misses],
            [100, 26, 20, 3, 4]
        );
        assert_eq!(state.n_geki, 0);
    }

    #[test]
    fn mania_state_slots() {
        let judgments = JudgmentCounts::new(GameMode::Mania)
            .with(Judgment::Perfect, 5)
            .with(Judgment::Great, 4)
            .with(Judgment::Good, 3)
            .with(Judgment::Ok, 2)
            .with(Judgment::Meh, 1);

        let state = score_state(GameMode::Mania, 0, &judgments);

        assert_eq!(
            [state.n_geki, state.n300, state.n_katu, state.n100, state.n50],
            [5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn format_header() {
        assert!(has_format_header(b"osu file format v14\n\n[General]"));
        assert!(has_format_header(b"\xEF\xBB\xBF\r\n  osu file format v3\n"));
        assert!(!has_format_header(b"definitely not a chart"));
        assert!(!has_format_header(b"[General]\nMode: 0\nosu file format v14"));
        assert!(!has_format_header(b""));
    }

    #[test]
    fn garbage_fails_to_decode() {
        let res = RosuEngine::new().decode(b"definitely not a chart");

        assert!(matches!(res, Err(EngineError::Decode(_))));
    }
}
