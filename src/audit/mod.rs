use std::fmt;

use serde::Serialize;

use crate::catalog::{Catalog, TierMode};
use crate::i18n::Language;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    NoMaps { boss: String },
    MissingReferenceText { boss: String, field: &'static str },
    UnknownItem { boss: String, map: String, item: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::NoMaps { boss } => write!(f, "{boss}: no map data"),
            Finding::MissingReferenceText { boss, field } => write!(
                f,
                "{boss}: '{field}' has no '{}' text",
                Language::REFERENCE.code()
            ),
            Finding::UnknownItem { boss, map, item } => {
                write!(f, "{boss} ({map}): item '{item}' is not in the item catalog")
            }
        }
    }
}

/// Checks the data contract the guide relies on without enforcing it.
pub fn audit(catalog: &Catalog) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (id, boss) in catalog.bosses.iter() {
        if boss.mode.is_empty() {
            findings.push(Finding::NoMaps {
                boss: id.to_string(),
            });
        }

        let mut texts = vec![("name", &boss.name), ("desc", &boss.desc), ("strategy", &boss.strategy)];
        if let Some(arena) = boss.arena.as_ref() {
            texts.push(("arena", arena));
        }
        if let Some(behavior) = boss.behavior.as_ref() {
            texts.push(("behavior", behavior));
        }
        for (field, text) in texts {
            if text.exact(Language::REFERENCE).is_none() {
                findings.push(Finding::MissingReferenceText {
                    boss: id.to_string(),
                    field,
                });
            }
        }

        let per_map: Vec<(&str, Vec<&crate::catalog::TierPayload>)> = match &boss.mode {
            TierMode::Single(maps) => maps
                .iter()
                .map(|(map, payload)| (map.as_str(), vec![payload]))
                .collect(),
            TierMode::Tiered(maps) => maps
                .iter()
                .map(|(map, set)| (map.as_str(), set.iter().map(|(_, p)| p).collect()))
                .collect(),
        };
        for (map, payloads) in per_map {
            let mut seen = Vec::new();
            for payload in payloads {
                let ids = payload
                    .tributes
                    .iter()
                    .chain(payload.loot.iter())
                    .map(|stack| stack.id.as_str())
                    .chain(payload.unlocks.iter().map(String::as_str));
                for item in ids {
                    if !catalog.items.contains(item) && !seen.contains(&item) {
                        seen.push(item);
                        findings.push(Finding::UnknownItem {
                            boss: id.to_string(),
                            map: map.to_string(),
                            item: item.to_string(),
                        });
                    }
                }
            }
        }
    }
    for finding in &findings {
        tracing::warn!(%finding, "catalog audit");
    }
    findings
}
