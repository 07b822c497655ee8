use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::model::mode::GameMode;

/// A hit quality bucket.
///
/// Not every judgment is meaningful for every mode, see [`Judgment::kinds`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    Perfect,
    Great,
    Good,
    Ok,
    Meh,
    Miss,
    /// Droplets in osu!catch.
    LargeTickHit,
    /// Tiny droplets in osu!catch.
    SmallTickHit,
    /// Missed tiny droplets in osu!catch.
    SmallTickMiss,
}

impl Judgment {
    /// Every judgment kind that may be provided as explicit statistics.
    pub const ALL: [Self; 9] = [
        Self::Great,
        Self::Ok,
        Self::Meh,
        Self::Good,
        Self::Perfect,
        Self::Miss,
        Self::LargeTickHit,
        Self::SmallTickHit,
        Self::SmallTickMiss,
    ];

    /// The name under which the judgment appears in score statistics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Great => "great",
            Self::Good => "good",
            Self::Ok => "ok",
            Self::Meh => "meh",
            Self::Miss => "miss",
            Self::LargeTickHit => "large_tick_hit",
            Self::SmallTickHit => "small_tick_hit",
            Self::SmallTickMiss => "small_tick_miss",
        }
    }

    /// The judgments a score of the given mode consists of, best first.
    pub const fn kinds(mode: GameMode) -> &'static [Self] {
        match mode {
            GameMode::Osu => &[Self::Great, Self::Ok, Self::Meh, Self::Miss],
            GameMode::Taiko => &[Self::Great, Self::Ok, Self::Miss],
            GameMode::Catch => &[
                Self::Great,
                Self::LargeTickHit,
                Self::SmallTickHit,
                Self::SmallTickMiss,
                Self::Miss,
            ],
            GameMode::Mania => &[
                Self::Perfect,
                Self::Great,
                Self::Good,
                Self::Ok,
                Self::Meh,
                Self::Miss,
            ],
        }
    }

    /// Accuracy contribution of a single judgment in the given mode.
    ///
    /// Divided by [`Judgment::max_base_score`] this yields the judgment's
    /// accuracy weight.
    pub const fn base_score(self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Osu => match self {
                Self::Great | Self::Perfect => 300,
                Self::Ok => 100,
                Self::Meh => 50,
                _ => 0,
            },
            GameMode::Taiko => match self {
                Self::Great | Self::Perfect => 300,
                Self::Ok | Self::Good => 150,
                _ => 0,
            },
            GameMode::Catch => match self {
                Self::Great | Self::LargeTickHit | Self::SmallTickHit => 1,
                _ => 0,
            },
            GameMode::Mania => match self {
                Self::Perfect => 305,
                Self::Great => 300,
                Self::Good => 200,
                Self::Ok => 100,
                Self::Meh => 50,
                _ => 0,
            },
        }
    }

    /// The highest [`Judgment::base_score`] of the mode.
    pub const fn max_base_score(mode: GameMode) -> u32 {
        match mode {
            GameMode::Osu | GameMode::Taiko => 300,
            GameMode::Catch => 1,
            GameMode::Mania => 305,
        }
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Amount of each judgment of a score.
///
/// Judgments that were never set count as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JudgmentCounts(BTreeMap<Judgment, u32>);

impl JudgmentCounts {
    /// Counts with an explicit zero entry for each judgment of the mode.
    pub fn new(mode: GameMode) -> Self {
        Self(Judgment::kinds(mode).iter().map(|&j| (j, 0)).collect())
    }

    /// Set the count of a judgment.
    #[must_use]
    pub fn with(mut self, judgment: Judgment, count: u32) -> Self {
        self.set(judgment, count);

        self
    }

    pub fn set(&mut self, judgment: Judgment, count: u32) {
        self.0.insert(judgment, count);
    }

    pub fn get(&self, judgment: Judgment) -> u32 {
        self.0.get(&judgment).copied().unwrap_or(0)
    }

    /// Iterate over all present judgments, best first.
    pub fn iter(&self) -> impl Iterator<Item = (Judgment, u32)> + '_ {
        self.0.iter().map(|(&j, &n)| (j, n))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Accuracy between `0.0` and `1.0` implied by the counts in the given
    /// mode, only considering the mode's judgments.
    pub fn accuracy(&self, mode: GameMode) -> f64 {
        let (numerator, total) = Judgment::kinds(mode)
            .iter()
            .fold((0_u64, 0_u64), |(numerator, total), &j| {
                let n = u64::from(self.get(j));

                (numerator + n * u64::from(j.base_score(mode)), total + n)
            });

        if total == 0 {
            return 0.0;
        }

        let denominator = total * u64::from(Judgment::max_base_score(mode));

        numerator as f64 / denominator as f64
    }
}

impl FromIterator<(Judgment, u32)> for JudgmentCounts {
    fn from_iter<I: IntoIterator<Item = (Judgment, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
