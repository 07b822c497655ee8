use serde::{Deserialize, Serialize};

use crate::model::mode::GameMode;

/// Counts of the chart elements that bound a score's judgments.
///
/// `max_fruits`, `max_large_ticks` and `max_small_ticks` are only filled for
/// osu!catch. Note that `max_large_ticks` *includes* the tiny droplets which
/// are also counted separately in `max_small_ticks`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCensus {
    /// Amount of primary objects.
    pub total: u32,
    pub max_fruits: u32,
    pub max_large_ticks: u32,
    pub max_small_ticks: u32,
}

/// A primary object of a mode-converted chart, as seen by the census.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CensusObject {
    Fruit,
    JuiceStream(Vec<NestedObject>),
    BananaShower,
    /// Any object of the other modes.
    Other,
}

/// An object nested inside a [`CensusObject::JuiceStream`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NestedObject {
    Fruit,
    Droplet,
    TinyDroplet,
}

impl ObjectCensus {
    /// Walk the primary objects and, for osu!catch, the objects nested in
    /// juice streams.
    pub fn from_objects<'a, I>(mode: GameMode, objects: I) -> Self
    where
        I: IntoIterator<Item = &'a CensusObject>,
    {
        let mut census = Self::default();

        for object in objects {
            census.total += 1;

            if mode != GameMode::Catch {
                continue;
            }

            match object {
                CensusObject::Fruit => census.max_fruits += 1,
                CensusObject::JuiceStream(nested) => {
                    for nested in nested {
                        match nested {
                            NestedObject::TinyDroplet => {
                                census.max_small_ticks += 1;
                                census.max_large_ticks += 1;
                            }
                            NestedObject::Droplet => census.max_large_ticks += 1,
                            NestedObject::Fruit => census.max_fruits += 1,
                        }
                    }
                }
                CensusObject::BananaShower | CensusObject::Other => {}
            }
        }

        census
    }

    /// Census of a non-catch chart with `total` primary objects.
    pub const fn from_total(total: u32) -> Self {
        Self {
            total,
            max_fruits: 0,
            max_large_ticks: 0,
            max_small_ticks: 0,
        }
    }

    /// Census of an osu!catch chart from disjoint counts as reported by a
    /// difficulty engine, i.e. `droplets` does not include `tiny_droplets`.
    pub const fn from_catch_counts(
        total: u32,
        fruits: u32,
        droplets: u32,
        tiny_droplets: u32,
    ) -> Self {
        Self {
            total,
            max_fruits: fruits,
            max_large_ticks: droplets + tiny_droplets,
            max_small_ticks: tiny_droplets,
        }
    }

    /// Droplets that are not tiny droplets.
    pub const fn max_droplets(&self) -> u32 {
        self.max_large_ticks.saturating_sub(self.max_small_ticks)
    }

    /// Maximum osu!catch combo, i.e. fruits and droplets.
    pub const fn max_catch_combo(&self) -> u32 {
        self.max_fruits + self.max_droplets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catch_chart() -> Vec<CensusObject> {
        use NestedObject::{Droplet, Fruit, TinyDroplet};

        vec![
            CensusObject::Fruit,
            CensusObject::JuiceStream(vec![Fruit, TinyDroplet, TinyDroplet, Droplet, Fruit]),
            CensusObject::Fruit,
            CensusObject::BananaShower,
            CensusObject::JuiceStream(vec![Fruit, Droplet, Droplet, TinyDroplet, Fruit]),
        ]
    }

    #[test]
    fn catch_traversal() {
        let census = ObjectCensus::from_objects(GameMode::Catch, &catch_chart());

        assert_eq!(census.total, 5);
        assert_eq!(census.max_fruits, 6);
        assert_eq!(census.max_large_ticks, 6);
        assert_eq!(census.max_small_ticks, 3);
        assert_eq!(census.max_droplets(), 3);
        assert_eq!(census.max_catch_combo(), 9);
    }

    #[test]
    fn other_modes_only_count_total() {
        let census = ObjectCensus::from_objects(GameMode::Osu, &catch_chart());

        assert_eq!(census, ObjectCensus::from_total(5));
    }

    #[test]
    fn empty_chart() {
        let census = ObjectCensus::from_objects(GameMode::Catch, &[]);

        assert_eq!(census, ObjectCensus::default());
    }

    #[test]
    fn engine_counts_match_traversal() {
        let traversed = ObjectCensus::from_objects(GameMode::Catch, &catch_chart());
        let reported = ObjectCensus::from_catch_counts(5, 6, 3, 3);

        assert_eq!(traversed, reported);
    }
}
