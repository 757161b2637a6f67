//! Resolves a selection into a renderable, language-specific content document.
//!
//! Everything here is plain data. The `output` module turns it into HTML or text.

use serde::Serialize;

use crate::catalog::{Catalog, ItemCatalog, ItemStack, Stats, Tier, TierMode, TierPayload};
use crate::i18n::{Language, UiKey};
use crate::resolver;
use crate::state::Selection;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentView {
    pub boss_id: String,
    pub name: String,
    pub desc: String,
    pub image: Option<String>,
    pub maps: Vec<String>,
    pub map: Option<String>,
    pub body: ContentBody,
    pub sections: Vec<Narrative>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "tiers", rename_all = "snake_case")]
pub enum ContentBody {
    MissingData,
    Single(TierView),
    Matrix(Vec<TierView>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TierView {
    pub tier: Option<Tier>,
    pub stats: Option<Stats>,
    pub tributes: Vec<ItemLine>,
    pub loot: Vec<ItemLine>,
    pub unlocks: Vec<UnlockLine>,
    pub previous_tiers_included: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemLine {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub quantity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnlockLine {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeKind {
    Arena,
    Behavior,
    Strategy,
}

impl NarrativeKind {
    pub fn title_key(self) -> UiKey {
        match self {
            NarrativeKind::Arena => UiKey::Arena,
            NarrativeKind::Behavior => UiKey::Attacks,
            NarrativeKind::Strategy => UiKey::Strategy,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NarrativeKind::Arena => "fa-location-dot",
            NarrativeKind::Behavior => "fa-paw",
            NarrativeKind::Strategy => "fa-chess-knight",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub kind: NarrativeKind,
    pub text: String,
}

/// `None` when nothing is selected or the selected id is not in the catalog.
pub fn build_content(catalog: &Catalog, selection: &Selection) -> Option<ContentView> {
    let id = selection.boss.as_deref()?;
    let boss = catalog.bosses.get(id)?;
    let lang = selection.language;

    let maps: Vec<String> = boss.mode.map_names().into_iter().map(str::to_string).collect();
    let map = maps.iter().find(|name| **name == selection.map).cloned();

    let body = match &boss.mode {
        TierMode::Single(by_map) => match by_map.get(&selection.map) {
            Some(payload) => ContentBody::Single(tier_view(None, payload, &catalog.items, lang)),
            None => ContentBody::MissingData,
        },
        TierMode::Tiered(by_map) => match by_map.get(&selection.map) {
            Some(set) => {
                let empty = TierPayload::default();
                ContentBody::Matrix(
                    Tier::ALL
                        .into_iter()
                        .map(|tier| {
                            let payload = set.get(tier).unwrap_or(&empty);
                            tier_view(Some(tier), payload, &catalog.items, lang)
                        })
                        .collect(),
                )
            }
            None => ContentBody::MissingData,
        },
    };

    let mut sections = Vec::with_capacity(3);
    if let Some(arena) = boss.arena.as_ref() {
        sections.push(Narrative {
            kind: NarrativeKind::Arena,
            text: arena.get(lang).to_string(),
        });
    }
    if let Some(behavior) = boss.behavior.as_ref() {
        sections.push(Narrative {
            kind: NarrativeKind::Behavior,
            text: behavior.get(lang).to_string(),
        });
    }
    sections.push(Narrative {
        kind: NarrativeKind::Strategy,
        text: boss.strategy.get(lang).to_string(),
    });

    Some(ContentView {
        boss_id: id.to_string(),
        name: boss.display_name(id, lang).to_string(),
        desc: boss.desc.get(lang).to_string(),
        image: boss.image.clone(),
        maps,
        map,
        body,
        sections,
    })
}

fn tier_view(
    tier: Option<Tier>,
    payload: &TierPayload,
    items: &ItemCatalog,
    lang: Language,
) -> TierView {
    TierView {
        tier,
        stats: payload.stats.clone(),
        tributes: item_lines(&payload.tributes, items, lang),
        loot: item_lines(&payload.loot, items, lang),
        unlocks: payload
            .unlocks
            .iter()
            .map(|id| {
                let resolved = resolver::resolve(items, id, lang);
                UnlockLine {
                    id: id.clone(),
                    name: resolved.name.to_string(),
                    icon: resolved.icon.map(str::to_string),
                }
            })
            .collect(),
        previous_tiers_included: tier.is_some_and(|tier| !tier.is_lowest()),
    }
}

fn item_lines(stacks: &[ItemStack], items: &ItemCatalog, lang: Language) -> Vec<ItemLine> {
    stacks
        .iter()
        .map(|stack| {
            let resolved = resolver::resolve(items, &stack.id, lang);
            ItemLine {
                id: stack.id.clone(),
                name: resolved.name.to_string(),
                icon: resolved.icon.map(str::to_string),
                quantity: stack.quantity.to_string(),
            }
        })
        .collect()
}
