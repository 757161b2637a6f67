pub mod loader;

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::i18n::{self, Language, LocalizedText, UiKey};

pub use loader::{load, CatalogSource, CatalogSources, LoadError, LoadOptions};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: LocalizedText,
    pub icon: String,
}

#[derive(Deserialize)]
struct RawItem {
    #[serde(default)]
    icon: String,
    #[serde(default)]
    name: Option<LocalizedText>,
    #[serde(flatten)]
    inline_name: LocalizedText,
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawItem::deserialize(deserializer)?;
        Ok(Item {
            name: raw.name.unwrap_or(raw.inline_name),
            icon: raw.icon,
        })
    }
}

/// A JSON number or string, kept as written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{n}"),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::Number(value.into())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub hp: Option<Amount>,
    #[serde(default)]
    pub dmg: Option<Amount>,
    #[serde(default)]
    pub lvl: Option<Amount>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: String,
    #[serde(rename = "q", alias = "quantity", default = "one")]
    pub quantity: Amount,
}

fn one() -> Amount {
    Amount::from(1)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPayload {
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub tributes: Vec<ItemStack>,
    #[serde(default)]
    pub loot: Vec<ItemStack>,
    #[serde(default)]
    pub unlocks: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Gamma,
    Beta,
    Alpha,
}

impl Tier {
    /// Lowest to highest.
    pub const ALL: [Tier; 3] = [Tier::Gamma, Tier::Beta, Tier::Alpha];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn key(self) -> &'static str {
        match self {
            Tier::Gamma => "Gamma",
            Tier::Beta => "Beta",
            Tier::Alpha => "Alpha",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Tier::Gamma => "gamma",
            Tier::Beta => "beta",
            Tier::Alpha => "alpha",
        }
    }

    pub fn label(self, lang: Language) -> &'static str {
        let key = match self {
            Tier::Gamma => UiKey::Gamma,
            Tier::Beta => UiKey::Beta,
            Tier::Alpha => UiKey::Alpha,
        };
        i18n::text(key, lang)
    }

    pub fn is_lowest(self) -> bool {
        self == Tier::ALL[0]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TierSet(BTreeMap<Tier, TierPayload>);

impl TierSet {
    pub fn get(&self, tier: Tier) -> Option<&TierPayload> {
        self.0.get(&tier)
    }

    pub fn insert(&mut self, tier: Tier, payload: TierPayload) {
        self.0.insert(tier, payload);
    }

    /// Present tiers, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &TierPayload)> {
        self.0.iter().map(|(tier, payload)| (*tier, payload))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "maps", rename_all = "snake_case")]
pub enum TierMode {
    Single(IndexMap<String, TierPayload>),
    Tiered(IndexMap<String, TierSet>),
}

impl TierMode {
    pub fn map_names(&self) -> Vec<&str> {
        match self {
            TierMode::Single(maps) => maps.keys().map(String::as_str).collect(),
            TierMode::Tiered(maps) => maps.keys().map(String::as_str).collect(),
        }
    }

    pub fn has_map(&self, name: &str) -> bool {
        match self {
            TierMode::Single(maps) => maps.contains_key(name),
            TierMode::Tiered(maps) => maps.contains_key(name),
        }
    }

    pub fn first_map(&self) -> Option<&str> {
        match self {
            TierMode::Single(maps) => maps.keys().next(),
            TierMode::Tiered(maps) => maps.keys().next(),
        }
        .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TierMode::Single(maps) => maps.is_empty(),
            TierMode::Tiered(maps) => maps.is_empty(),
        }
    }

    /// Every payload in catalog map order, tiers ascending within a map.
    pub fn payloads(&self) -> Vec<&TierPayload> {
        match self {
            TierMode::Single(maps) => maps.values().collect(),
            TierMode::Tiered(maps) => maps
                .values()
                .flat_map(|set| set.iter().map(|(_, payload)| payload))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Primary,
    Titan,
    MiniBoss,
    Other(String),
}

impl Category {
    pub const ORDERED: [Category; 3] = [Category::Primary, Category::Titan, Category::MiniBoss];

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "Bosse" | "primary-bosses" => Category::Primary,
            "Titanen" | "titan-tier" => Category::Titan,
            "Minibosse" | "mini-bosses" => Category::MiniBoss,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Category::Primary => "primary-bosses",
            Category::Titan => "titan-tier",
            Category::MiniBoss => "mini-bosses",
            Category::Other(name) => name,
        }
    }

    pub fn label(&self, lang: Language) -> &str {
        match self {
            Category::Primary => i18n::text(UiKey::CategoryPrimary, lang),
            Category::Titan => i18n::text(UiKey::CategoryTitan, lang),
            Category::MiniBoss => i18n::text(UiKey::CategoryMiniBoss, lang),
            Category::Other(name) => name,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Primary | Category::Other(_) => "fa-skull",
            Category::Titan => "fa-mountain",
            Category::MiniBoss => "fa-spider",
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Category::parse).unwrap_or_default())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoss")]
pub struct Boss {
    pub name: LocalizedText,
    pub desc: LocalizedText,
    pub arena: Option<LocalizedText>,
    pub behavior: Option<LocalizedText>,
    pub strategy: LocalizedText,
    pub icon: String,
    pub image: Option<String>,
    pub category: Category,
    pub mode: TierMode,
}

impl Boss {
    pub fn is_tiered(&self) -> bool {
        matches!(self.mode, TierMode::Tiered(_))
    }

    /// Localized name, falling back to the catalog id when the entry has none.
    pub fn display_name<'a>(&'a self, id: &'a str, lang: Language) -> &'a str {
        match self.name.get(lang) {
            "" => id,
            name => name,
        }
    }
}

#[derive(Deserialize)]
struct RawBoss {
    #[serde(default)]
    name: LocalizedText,
    #[serde(default)]
    desc: LocalizedText,
    #[serde(default)]
    arena: Option<LocalizedText>,
    #[serde(default)]
    behavior: Option<LocalizedText>,
    #[serde(default)]
    strategy: LocalizedText,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    category: Category,
    #[serde(rename = "hasDiff", default)]
    has_diff: Option<bool>,
    #[serde(default)]
    maps: IndexMap<String, serde_json::Value>,
}

impl TryFrom<RawBoss> for Boss {
    type Error = serde_json::Error;

    fn try_from(raw: RawBoss) -> Result<Self, Self::Error> {
        let mode = if raw.has_diff == Some(false) {
            let mut maps = IndexMap::with_capacity(raw.maps.len());
            for (map, value) in raw.maps {
                maps.insert(map, serde_json::from_value::<TierPayload>(value)?);
            }
            TierMode::Single(maps)
        } else {
            let mut maps = IndexMap::with_capacity(raw.maps.len());
            for (map, value) in raw.maps {
                let by_key = serde_json::from_value::<IndexMap<String, TierPayload>>(value)?;
                let mut set = TierSet::default();
                for (key, payload) in by_key {
                    match Tier::from_key(&key) {
                        Some(tier) => set.insert(tier, payload),
                        None => tracing::debug!(map = %map, tier = %key, "dropping unknown tier"),
                    }
                }
                maps.insert(map, set);
            }
            TierMode::Tiered(maps)
        };
        Ok(Boss {
            name: raw.name,
            desc: raw.desc,
            arena: raw.arena.filter(|text| !text.is_empty()),
            behavior: raw.behavior.filter(|text| !text.is_empty()),
            strategy: raw.strategy,
            icon: raw.icon,
            image: raw.image.filter(|image| !image.trim().is_empty()),
            category: raw.category,
            mode,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog(IndexMap<String, Item>);

impl ItemCatalog {
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Item)> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Item)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Bosses in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BossCatalog(IndexMap<String, Boss>);

impl BossCatalog {
    pub fn get(&self, id: &str) -> Option<&Boss> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn first_id(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Boss)> {
        self.0.iter().map(|(id, boss)| (id.as_str(), boss))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Boss)> for BossCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Boss)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Both documents, populated once at startup and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub items: ItemCatalog,
    pub bosses: BossCatalog,
}

impl Catalog {
    pub fn from_json(items: &str, bosses: &str) -> Result<Self, LoadError> {
        let items = serde_json::from_str::<ItemCatalog>(items)
            .map_err(|source| LoadError::Parse { kind: "items", source })?;
        let bosses = serde_json::from_str::<BossCatalog>(bosses)
            .map_err(|source| LoadError::Parse { kind: "bosses", source })?;
        Ok(Self { items, bosses })
    }
}
