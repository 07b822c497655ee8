use std::{borrow::Cow, fmt};

use rosu_mods::{GameMod, GameModIntermode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::model::mode::{mods_mode, GameMode};

/// The mods a ruleset declares as available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModCatalogue {
    source: CatalogueSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum CatalogueSource {
    /// Everything `rosu-mods` knows for the ruleset.
    Ruleset(rosu_mods::GameMode),
    List(Vec<Cow<'static, str>>),
}

impl ModCatalogue {
    /// Create a catalogue from canonical acronyms.
    pub fn new<I, S>(acronyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            source: CatalogueSource::List(acronyms.into_iter().map(Into::into).collect()),
        }
    }

    /// All mods of the mode's ruleset.
    pub const fn for_mode(mode: GameMode) -> Self {
        Self {
            source: CatalogueSource::Ruleset(mods_mode(mode)),
        }
    }

    /// The canonical spelling of `acronym`, matched case-insensitively.
    pub fn find(&self, acronym: &str) -> Option<Cow<'_, str>> {
        match self.source {
            CatalogueSource::Ruleset(mode) => ruleset_acronym(acronym, mode).map(Cow::Owned),
            CatalogueSource::List(ref acronyms) => acronyms
                .iter()
                .find(|available| available.eq_ignore_ascii_case(acronym))
                .map(|available| Cow::Borrowed(available.as_ref())),
        }
    }

    pub fn contains(&self, acronym: &str) -> bool {
        self.find(acronym).is_some()
    }
}

fn ruleset_acronym(acronym: &str, mode: rosu_mods::GameMode) -> Option<String> {
    // Acronyms are at most three alphanumeric characters
    let well_formed = (1..=3).contains(&acronym.len())
        && acronym.bytes().all(|byte| byte.is_ascii_alphanumeric());

    if !well_formed {
        return None;
    }

    match GameMod::new(&acronym.to_ascii_uppercase(), mode) {
        GameMod::UnknownOsu(_)
        | GameMod::UnknownTaiko(_)
        | GameMod::UnknownCatch(_)
        | GameMod::UnknownMania(_) => None,
        gamemod => Some(gamemod.acronym().as_str().to_owned()),
    }
}

/// A mod as provided by a caller.
///
/// Deserializes from a JSON string (bare acronym), a JSON object (a record
/// with an `acronym` or `Acronym` field) or anything else, which is kept as
/// [`RawMod::Other`] and later reported as unparsable.
#[derive(Clone, Debug, PartialEq)]
pub enum RawMod {
    /// A bare acronym such as `"HD"`.
    Acronym(String),
    /// A record such as `{ "acronym": "DT", "settings": { ... } }`.
    Record(Map<String, Value>),
    /// A typed mod.
    Mod(GameModIntermode),
    /// Anything else.
    Other(Value),
}

impl RawMod {
    /// Extract the acronym; `None` if there is none or it is empty.
    pub fn acronym(&self) -> Option<Cow<'_, str>> {
        let acronym = match self {
            Self::Acronym(acronym) => Cow::Borrowed(acronym.as_str()),
            Self::Record(record) => ["acronym", "Acronym"]
                .iter()
                .filter_map(|key| record.get(*key).and_then(Value::as_str))
                .find(|acronym| !acronym.is_empty())
                .map(Cow::Borrowed)?,
            Self::Mod(gamemod) => Cow::Owned(gamemod.acronym().as_str().to_owned()),
            Self::Other(_) => return None,
        };

        (!acronym.trim().is_empty()).then_some(acronym)
    }
}

impl From<&str> for RawMod {
    fn from(acronym: &str) -> Self {
        Self::Acronym(acronym.to_owned())
    }
}

impl From<String> for RawMod {
    fn from(acronym: String) -> Self {
        Self::Acronym(acronym)
    }
}

impl From<GameModIntermode> for RawMod {
    fn from(gamemod: GameModIntermode) -> Self {
        Self::Mod(gamemod)
    }
}

impl From<Value> for RawMod {
    fn from(value: Value) -> Self {
        match value {
            Value::String(acronym) => Self::Acronym(acronym),
            Value::Object(record) => Self::Record(record),
            other => Self::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for RawMod {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Value::deserialize(d).map(Self::from)
    }
}

/// Validated canonical acronyms in the order they were first provided.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModSelection(Vec<String>);

impl ModSelection {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether the selection contains `acronym`, ignoring case.
    pub fn contains(&self, acronym: &str) -> bool {
        self.iter().any(|selected| selected.eq_ignore_ascii_case(acronym))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NM");
        }

        self.iter().try_for_each(|acronym| f.write_str(acronym))
    }
}

/// A provided mod that did not make it into the [`ModSelection`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModWarning {
    /// No acronym could be extracted from the entry at `index`.
    Unparsable { index: usize },
    /// The acronym is not available for the mode.
    Unavailable { acronym: String },
    /// The acronym was already selected.
    Duplicate { acronym: String },
}

impl fmt::Display for ModWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparsable { index } => write!(f, "mod #{index} has no acronym"),
            Self::Unavailable { acronym } => write!(f, "mod `{acronym}` is not available"),
            Self::Duplicate { acronym } => write!(f, "mod `{acronym}` was provided twice"),
        }
    }
}

/// Result of [`normalize`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedMods {
    pub selection: ModSelection,
    pub warnings: Vec<ModWarning>,
}

/// Resolve raw mods to canonical acronyms of the `catalogue`.
///
/// Entries without acronym and acronyms unknown to the catalogue are dropped
/// and reported as warnings; they never cause an error.
pub fn normalize(raw: &[RawMod], catalogue: &ModCatalogue) -> NormalizedMods {
    let mut normalized = NormalizedMods::default();

    for (index, entry) in raw.iter().enumerate() {
        let Some(acronym) = entry.acronym() else {
            tracing::debug!(index, ?entry, "Skipping mod without acronym");
            normalized.warnings.push(ModWarning::Unparsable { index });

            continue;
        };

        let acronym = acronym.trim();

        let Some(canonical) = catalogue.find(acronym) else {
            tracing::debug!(acronym, "Skipping unavailable mod");
            normalized.warnings.push(ModWarning::Unavailable {
                acronym: acronym.to_owned(),
            });

            continue;
        };

        if normalized.selection.contains(&canonical) {
            normalized.warnings.push(ModWarning::Duplicate {
                acronym: canonical.into_owned(),
            });

            continue;
        }

        normalized.selection.0.push(canonical.into_owned());
    }

    normalized
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn osu() -> ModCatalogue {
        ModCatalogue::for_mode(GameMode::Osu)
    }

    #[test]
    fn case_insensitive_shapes() {
        let raw: Vec<RawMod> = serde_json::from_value(json!(["hd", "HD", { "acronym": "Hd" }]))
            .unwrap();

        for entry in &raw {
            let normalized = normalize(std::slice::from_ref(entry), &osu());

            assert_eq!(normalized.selection.iter().collect::<Vec<_>>(), ["HD"]);
            assert!(normalized.warnings.is_empty());
        }

        let normalized = normalize(&raw, &osu());

        assert_eq!(normalized.selection.len(), 1);
        assert_eq!(normalized.warnings.len(), 2);
    }

    #[test]
    fn record_prefers_lowercase_key() {
        let raw = RawMod::from(json!({ "acronym": "DT", "Acronym": "HT" }));

        assert_eq!(raw.acronym().as_deref(), Some("DT"));

        let raw = RawMod::from(json!({ "acronym": "", "Acronym": "HT" }));

        assert_eq!(raw.acronym().as_deref(), Some("HT"));
    }

    #[test]
    fn typed_mod() {
        let raw = RawMod::from(GameModIntermode::HardRock);
        let normalized = normalize(&[raw], &osu());

        assert_eq!(normalized.selection.to_string(), "HR");
    }

    #[test]
    fn keeps_first_seen_order() {
        let raw: Vec<RawMod> = ["dt", "HD", "hr", "Dt"].into_iter().map(RawMod::from).collect();
        let normalized = normalize(&raw, &osu());

        assert_eq!(normalized.selection.to_string(), "DTHDHR");
        assert_eq!(
            normalized.warnings,
            [ModWarning::Duplicate {
                acronym: "DT".to_owned()
            }]
        );
    }

    #[test]
    fn drops_unknown_and_unparsable() {
        let raw: Vec<RawMod> = serde_json::from_value(json!([
            "HD",
            { "settings": {} },
            42,
            "XX",
            "4K",
            ""
        ]))
        .unwrap();

        let normalized = normalize(&raw, &osu());

        assert_eq!(normalized.selection.to_string(), "HD");
        assert_eq!(
            normalized.warnings,
            [
                ModWarning::Unparsable { index: 1 },
                ModWarning::Unparsable { index: 2 },
                ModWarning::Unavailable {
                    acronym: "XX".to_owned()
                },
                ModWarning::Unavailable {
                    acronym: "4K".to_owned()
                },
                ModWarning::Unparsable { index: 5 },
            ]
        );
    }

    #[test]
    fn key_mods_are_mania_only() {
        let mania = ModCatalogue::for_mode(GameMode::Mania);

        assert_eq!(mania.find("10k").as_deref(), Some("10K"));
        assert!(!osu().contains("7K"));
    }

    #[test]
    fn rulesets_follow_rosu_mods() {
        let taiko = ModCatalogue::for_mode(GameMode::Taiko);
        let catch = ModCatalogue::for_mode(GameMode::Catch);

        assert_eq!(osu().find("td").as_deref(), Some("TD"));
        assert_eq!(osu().find("sv2").as_deref(), Some("SV2"));
        assert!(!osu().contains("NR"));
        assert!(!taiko.contains("SO"));
        assert!(!catch.contains("FR"));
        assert!(!catch.contains("MF"));
        assert!(!osu().contains("HDDT"));
        assert!(!osu().contains("H D"));
    }

    #[test]
    fn custom_list() {
        let catalogue = ModCatalogue::new(["HD", "XX"]);
        let raw: Vec<RawMod> = ["xx", "hd", "DT"].into_iter().map(RawMod::from).collect();
        let normalized = normalize(&raw, &catalogue);

        assert_eq!(normalized.selection.to_string(), "XXHD");
        assert_eq!(
            normalized.warnings,
            [ModWarning::Unavailable {
                acronym: "DT".to_owned()
            }]
        );
    }

    #[test]
    fn empty_selection_displays_nomod() {
        assert_eq!(normalize(&[], &osu()).selection.to_string(), "NM");
    }
}
