use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::De, Language::En];

    /// Used whenever the active language has no string for a field.
    pub const REFERENCE: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::De => "DE",
            Language::En => "EN",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            let known = Self::ALL.map(Language::code).join(", ");
            format!("unknown language '{s}', expected one of: {known}")
        })
    }
}

/// A per-language string as found in the catalog documents.
///
/// Deserializes from an object keyed by language code. Codes that are not a
/// known [`Language`] and non-string values are skipped, so the same type can
/// sit flattened next to other fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedText(BTreeMap<Language, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        self.0.insert(lang, text.into());
        self
    }

    /// Active language, then [`Language::REFERENCE`], then whatever is there.
    /// Empty strings count as absent.
    pub fn get(&self, lang: Language) -> &str {
        let present = |lang: &Language| self.0.get(lang).filter(|text| !text.is_empty());
        present(&lang)
            .or_else(|| present(&Language::REFERENCE))
            .or_else(|| self.0.values().find(|text| !text.is_empty()))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn exact(&self, lang: Language) -> Option<&str> {
        self.0
            .get(&lang)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut values = BTreeMap::new();
        for (code, value) in raw {
            let (Some(lang), serde_json::Value::String(text)) = (Language::from_code(&code), value)
            else {
                continue;
            };
            values.insert(lang, text);
        }
        Ok(Self(values))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiKey {
    Stats,
    Tribute,
    Loot,
    Unlocks,
    Strategy,
    Hp,
    Dmg,
    Lvl,
    Gamma,
    Beta,
    Alpha,
    PreviousTiers,
    Arena,
    Attacks,
    CategoryPrimary,
    CategoryTitan,
    CategoryMiniBoss,
    UnlockBadge,
    Map,
    NoData,
    DataMissing,
    LoadFailed,
    SearchPlaceholder,
}

pub fn text(key: UiKey, lang: Language) -> &'static str {
    match lang {
        Language::De => match key {
            UiKey::Stats => "Werte & Anforderungen",
            UiKey::Tribute => "Tribute (Beschwörung)",
            UiKey::Loot => "Loot & Belohnung",
            UiKey::Unlocks => "Tek Engramme",
            UiKey::Strategy => "Strategie",
            UiKey::Hp => "Leben",
            UiKey::Dmg => "Schaden",
            UiKey::Lvl => "Min. Level",
            UiKey::Gamma => "Gamma",
            UiKey::Beta => "Beta",
            UiKey::Alpha => "Alpha",
            UiKey::PreviousTiers => "+ Vorherige Stufen",
            UiKey::Arena => "Arena Informationen",
            UiKey::Attacks => "Boss Verhalten & Angriffe",
            UiKey::CategoryPrimary => "Bosse",
            UiKey::CategoryTitan => "Titanen",
            UiKey::CategoryMiniBoss => "Minibosse",
            UiKey::UnlockBadge => "Tek",
            UiKey::Map => "Karte",
            UiKey::NoData => "Keine Daten",
            UiKey::DataMissing => "Daten fehlen.",
            UiKey::LoadFailed => "Fehler beim Laden der Daten. Bitte Seite neu laden.",
            UiKey::SearchPlaceholder => "Boss oder Engramm suchen...",
        },
        Language::En => match key {
            UiKey::Stats => "Stats & Requirements",
            UiKey::Tribute => "Tributes (Summon)",
            UiKey::Loot => "Loot & Rewards",
            UiKey::Unlocks => "Tek Engrams",
            UiKey::Strategy => "Strategy",
            UiKey::Hp => "Health",
            UiKey::Dmg => "Damage",
            UiKey::Lvl => "Min. Level",
            UiKey::Gamma => "Gamma",
            UiKey::Beta => "Beta",
            UiKey::Alpha => "Alpha",
            UiKey::PreviousTiers => "+ Previous Tiers",
            UiKey::Arena => "Arena Information",
            UiKey::Attacks => "Boss Behavior & Attacks",
            UiKey::CategoryPrimary => "Bosses",
            UiKey::CategoryTitan => "Titans",
            UiKey::CategoryMiniBoss => "Mini Bosses",
            UiKey::UnlockBadge => "Tek",
            UiKey::Map => "Map",
            UiKey::NoData => "No data",
            UiKey::DataMissing => "Data missing.",
            UiKey::LoadFailed => "Failed to load data. Please reload the page.",
            UiKey::SearchPlaceholder => "Search boss or engram...",
        },
    }
}
