use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::model::{
    judgment::{Judgment, JudgmentCounts},
    mode::GameMode,
};

/// Anything that can provide a judgment count by name.
///
/// Implemented for string-keyed maps, JSON values and [`ApiStatistics`] so
/// that all of them can be turned into [`PartialStatistics`].
pub trait StatisticsLookup {
    /// The count stored under exactly `name`, if any.
    fn lookup(&self, name: &str) -> Option<u32>;
}

impl<S: StatisticsLookup + ?Sized> StatisticsLookup for &S {
    fn lookup(&self, name: &str) -> Option<u32> {
        (**self).lookup(name)
    }
}

impl<K, S> StatisticsLookup for HashMap<K, u32, S>
where
    K: std::borrow::Borrow<str> + Eq + std::hash::Hash,
    S: std::hash::BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<u32> {
        self.get(name).copied()
    }
}

impl<K: std::borrow::Borrow<str> + Ord> StatisticsLookup for BTreeMap<K, u32> {
    fn lookup(&self, name: &str) -> Option<u32> {
        self.get(name).copied()
    }
}

impl StatisticsLookup for Map<String, Value> {
    fn lookup(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(count_from_value)
    }
}

impl StatisticsLookup for Value {
    fn lookup(&self, name: &str) -> Option<u32> {
        match self {
            Value::Object(map) => map.lookup(name),
            _ => None,
        }
    }
}

fn count_from_value(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }

    value
        .as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

/// Score statistics in the shape of the osu! API.
///
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiStatistics {
    pub great: Option<u32>,
    pub ok: Option<u32>,
    pub meh: Option<u32>,
    pub good: Option<u32>,
    pub perfect: Option<u32>,
    pub miss: Option<u32>,
    pub large_tick_hit: Option<u32>,
    pub small_tick_hit: Option<u32>,
    pub small_tick_miss: Option<u32>,
}

impl StatisticsLookup for ApiStatistics {
    fn lookup(&self, name: &str) -> Option<u32> {
        match name {
            "great" => self.great,
            "ok" => self.ok,
            "meh" => self.meh,
            "good" => self.good,
            "perfect" => self.perfect,
            "miss" => self.miss,
            "large_tick_hit" => self.large_tick_hit,
            "small_tick_hit" => self.small_tick_hit,
            "small_tick_miss" => self.small_tick_miss,
            _ => None,
        }
    }
}

/// Caller provided judgment counts; any subset of judgments may be present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PartialStatistics(BTreeMap<Judgment, u32>);

impl PartialStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every known judgment from `source`.
    ///
    /// Each judgment is looked up by its name, e.g. `"great"`, and if that is
    /// missing by the capitalized name, e.g. `"Great"`.
    pub fn from_lookup<S: StatisticsLookup + ?Sized>(source: &S) -> Self {
        let counts = Judgment::ALL
            .iter()
            .filter_map(|&judgment| {
                let name = judgment.name();

                source
                    .lookup(name)
                    .or_else(|| source.lookup(&capitalize(name)))
                    .map(|count| (judgment, count))
            })
            .collect();

        Self(counts)
    }

    /// Set the count of a judgment.
    #[must_use]
    pub fn with(mut self, judgment: Judgment, count: u32) -> Self {
        self.0.insert(judgment, count);

        self
    }

    pub fn get(&self, judgment: Judgment) -> Option<u32> {
        self.0.get(&judgment).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any judgment has a positive count.
    pub fn has_hits(&self) -> bool {
        self.0.values().any(|&n| n > 0)
    }

    /// Copy the judgments of the mode verbatim; missing ones become zero.
    pub fn judgments(&self, mode: GameMode) -> JudgmentCounts {
        Judgment::kinds(mode)
            .iter()
            .map(|&judgment| (judgment, self.get(judgment).unwrap_or(0)))
            .collect()
    }
}

impl<'de> Deserialize<'de> for PartialStatistics {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(d)?;

        Ok(Self::from_lookup(&map))
    }
}

impl From<ApiStatistics> for PartialStatistics {
    fn from(statistics: ApiStatistics) -> Self {
        Self::from_lookup(&statistics)
    }
}

impl FromIterator<(Judgment, u32)> for PartialStatistics {
    fn from_iter<I: IntoIterator<Item = (Judgment, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Where the judgments of a calculation come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitResultSource {
    /// Caller provided statistics, used verbatim.
    Explicit,
    /// Reconstructed from the accuracy.
    Simulated,
}

/// Outcome of [`resolve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedStatistics<'a> {
    /// The statistics to copy verbatim, `None` if they must be simulated.
    pub explicit: Option<&'a PartialStatistics>,
    /// The miss count to use.
    pub misses: u32,
}

impl ResolvedStatistics<'_> {
    pub const fn source(&self) -> HitResultSource {
        if self.explicit.is_some() {
            HitResultSource::Explicit
        } else {
            HitResultSource::Simulated
        }
    }
}

/// Decide whether `partial` statistics are used verbatim.
///
/// They are used if any of their judgments is positive, in which case their
/// miss count is authoritative and `provided_misses` is ignored.
pub fn resolve(partial: Option<&PartialStatistics>, provided_misses: u32) -> ResolvedStatistics<'_> {
    match partial {
        Some(statistics) if statistics.has_hits() => {
            let misses = statistics.get(Judgment::Miss).unwrap_or(0);

            tracing::debug!(misses, "Using explicit statistics");

            ResolvedStatistics {
                explicit: Some(statistics),
                misses,
            }
        }
        _ => {
            tracing::debug!(misses = provided_misses, "Simulating statistics from accuracy");

            ResolvedStatistics {
                explicit: None,
                misses: provided_misses,
            }
        }
    }
}
