#![allow(unused)]

use std::{io, sync::Mutex};

use rosu_hitstats::{
    engine::{DifficultyValues, EngineError, ScoringEngine},
    model::census::{CensusObject, NestedObject},
    ChartMetadata, GameMode, ModSelection, ObjectCensus, ScoreContext,
};

pub const SAMPLE: &str = "./resources/sample.osu";

/// A tiny catch chart for [`FakeEngine`]: 6 fruits, 3 droplets, 3 tiny
/// droplets.
pub const CATCH_CHART: &str = "\
mode 2
fruit
stream fruit tiny tiny droplet fruit
fruit
banana
stream fruit droplet droplet tiny fruit
";

/// Chart with `n` objects in the given mode for [`FakeEngine`].
pub fn chart(mode: u8, n: usize) -> String {
    let mut chart = format!("mode {mode}\n");

    for _ in 0..n {
        chart.push_str("circle\n");
    }

    chart
}

/// Line based chart format:
///
/// - optional first line `mode <id>`
/// - `fruit`, `banana`, `circle` for primary objects
/// - `stream <nested>*` with nested `fruit`, `droplet`, `tiny`
/// - `panic` to make the difficulty calculation panic
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub scores: Mutex<Vec<ScoreContext>>,
}

#[derive(Debug)]
pub struct FakeChart {
    pub mode: GameMode,
    pub objects: Vec<CensusObject>,
    pub panics: bool,
}

#[derive(Debug)]
pub struct FakeAttributes {
    pub stars: f64,
    pub max_combo: u32,
}

impl DifficultyValues for FakeAttributes {
    fn stars(&self) -> f64 {
        self.stars
    }

    fn max_combo(&self) -> u32 {
        self.max_combo
    }
}

impl FakeEngine {
    pub fn last_score(&self) -> ScoreContext {
        self.scores.lock().unwrap().last().cloned().unwrap()
    }
}

fn invalid(msg: String) -> EngineError {
    EngineError::Decode(io::Error::new(io::ErrorKind::InvalidData, msg))
}

impl ScoringEngine for FakeEngine {
    type Chart = FakeChart;
    type Attributes = FakeAttributes;

    fn decode(&self, bytes: &[u8]) -> Result<FakeChart, EngineError> {
        let text = std::str::from_utf8(bytes).map_err(|err| invalid(err.to_string()))?;

        let mut chart = FakeChart {
            mode: GameMode::Osu,
            objects: Vec::new(),
            panics: false,
        };

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let mut words = line.split_whitespace();

            let object = match words.next() {
                Some("mode") => {
                    chart.mode = match words.next() {
                        Some("0") => GameMode::Osu,
                        Some("1") => GameMode::Taiko,
                        Some("2") => GameMode::Catch,
                        Some("3") => GameMode::Mania,
                        other => return Err(invalid(format!("bad mode {other:?}"))),
                    };

                    continue;
                }
                Some("panic") => {
                    chart.panics = true;

                    continue;
                }
                Some("fruit") => CensusObject::Fruit,
                Some("banana") => CensusObject::BananaShower,
                Some("circle") => CensusObject::Other,
                Some("stream") => {
                    let nested = words
                        .by_ref()
                        .map(|word| match word {
                            "fruit" => Ok(NestedObject::Fruit),
                            "droplet" => Ok(NestedObject::Droplet),
                            "tiny" => Ok(NestedObject::TinyDroplet),
                            other => Err(invalid(format!("bad nested object `{other}`"))),
                        })
                        .collect::<Result<_, _>>()?;

                    CensusObject::JuiceStream(nested)
                }
                _ => return Err(invalid(format!("bad line `{line}`"))),
            };

            chart.objects.push(object);
        }

        Ok(chart)
    }

    fn convert(
        &self,
        chart: &mut FakeChart,
        mode: GameMode,
        _: &ModSelection,
    ) -> Result<(), EngineError> {
        if chart.mode == mode {
            return Ok(());
        }

        if chart.mode != GameMode::Osu {
            return Err(EngineError::Conversion {
                from: chart.mode,
                to: mode,
            });
        }

        chart.mode = mode;

        Ok(())
    }

    fn difficulty(
        &self,
        chart: &FakeChart,
        _: GameMode,
        mods: &ModSelection,
    ) -> Result<FakeAttributes, EngineError> {
        assert!(!chart.panics, "difficulty exploded");

        let clock_rate = if mods.contains("DT") { 1.5 } else { 1.0 };

        Ok(FakeAttributes {
            stars: chart.objects.len() as f64 * 0.1 * clock_rate,
            max_combo: chart.objects.len() as u32,
        })
    }

    fn census(&self, chart: &FakeChart, mode: GameMode, _: &FakeAttributes) -> ObjectCensus {
        ObjectCensus::from_objects(mode, &chart.objects)
    }

    fn performance(&self, score: ScoreContext, attrs: FakeAttributes) -> Result<f64, EngineError> {
        let pp = attrs.stars * 10.0 * score.accuracy;
        self.scores.lock().unwrap().push(score);

        Ok(pp)
    }

    fn metadata(&self, _: &[u8]) -> Option<ChartMetadata> {
        Some(ChartMetadata {
            title: "Fake".to_owned(),
            artist: "Nobody".to_owned(),
            version: "Test".to_owned(),
            creator: "rosu-hitstats".to_owned(),
        })
    }
}

#[track_caller]
pub fn assert_eq_float(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
