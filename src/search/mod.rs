use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::{Boss, Catalog, Category, ItemCatalog};
use crate::i18n::{self, Language, UiKey};
use crate::resolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    Name,
    Unlock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BossSummary {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// `None` when the query was empty.
    pub reason: Option<MatchReason>,
}

impl BossSummary {
    pub fn badge(&self, lang: Language) -> Option<&'static str> {
        match self.reason {
            Some(MatchReason::Unlock) => Some(i18n::text(UiKey::UnlockBadge, lang)),
            Some(MatchReason::Name) | None => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BossGroup {
    pub category: Category,
    pub entries: Vec<BossSummary>,
}

pub fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}

/// Bosses matching `query`, grouped by category.
///
/// Known categories come first in their fixed order, unknown ones follow in the
/// order they were first seen. Entries keep catalog order and empty groups are
/// left out.
pub fn filter(query: &str, lang: Language, catalog: &Catalog) -> Vec<BossGroup> {
    let query = normalize_query(query);
    let mut grouped: IndexMap<Category, Vec<BossSummary>> = IndexMap::new();

    for (id, boss) in catalog.bosses.iter() {
        let Some(reason) = match_boss(id, boss, &query, lang, &catalog.items) else {
            continue;
        };
        let summary = BossSummary {
            id: id.to_string(),
            name: boss.display_name(id, lang).to_string(),
            icon: boss.icon.clone(),
            reason: if query.is_empty() { None } else { Some(reason) },
        };
        grouped
            .entry(boss.category.clone())
            .or_default()
            .push(summary);
    }

    let mut groups = Vec::with_capacity(grouped.len());
    for category in Category::ORDERED {
        if let Some(entries) = grouped.shift_remove(&category) {
            groups.push(BossGroup { category, entries });
        }
    }
    groups.extend(
        grouped
            .into_iter()
            .map(|(category, entries)| BossGroup { category, entries }),
    );
    groups.retain(|group| !group.entries.is_empty());
    groups
}

fn match_boss(
    id: &str,
    boss: &Boss,
    query: &str,
    lang: Language,
    items: &ItemCatalog,
) -> Option<MatchReason> {
    if boss.display_name(id, lang).to_lowercase().contains(query) {
        return Some(MatchReason::Name);
    }
    let unlocked = boss
        .mode
        .payloads()
        .into_iter()
        .flat_map(|payload| payload.unlocks.iter())
        .any(|unlock| {
            resolver::resolve(items, unlock, lang)
                .name
                .to_lowercase()
                .contains(query)
        });
    unlocked.then_some(MatchReason::Unlock)
}

pub fn total_entries(groups: &[BossGroup]) -> usize {
    groups.iter().map(|group| group.entries.len()).sum()
}
