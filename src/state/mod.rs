use serde::Serialize;

use crate::catalog::{Boss, BossCatalog};
use crate::i18n::Language;

pub const DEFAULT_BOSS: &str = "broodmother";
pub const DEFAULT_MAP: &str = "The Island";

/// Which parts of the guide have to be drawn again after a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Rerender {
    pub list: bool,
    pub content: bool,
}

impl Rerender {
    pub const NONE: Rerender = Rerender {
        list: false,
        content: false,
    };
    pub const LIST: Rerender = Rerender {
        list: true,
        content: false,
    };
    pub const CONTENT: Rerender = Rerender {
        list: false,
        content: true,
    };
    pub const ALL: Rerender = Rerender {
        list: true,
        content: true,
    };

    pub fn is_none(self) -> bool {
        self == Rerender::NONE
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SelectBoss(String),
    SelectMap(String),
    SetLanguage(Language),
    SetQuery(String),
}

#[derive(Clone, Debug)]
pub struct Defaults {
    pub boss: String,
    pub map: String,
    pub language: Language,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            boss: DEFAULT_BOSS.to_string(),
            map: DEFAULT_MAP.to_string(),
            language: Language::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub boss: Option<String>,
    pub map: String,
    pub language: Language,
    pub query: String,
}

impl Selection {
    /// The preferred boss when the catalog has it, otherwise the first boss.
    pub fn initial(bosses: &BossCatalog, defaults: &Defaults) -> Self {
        let boss = if bosses.contains(&defaults.boss) {
            Some(defaults.boss.clone())
        } else {
            bosses.first_id().map(str::to_string)
        };
        let map = match boss.as_deref().and_then(|id| bosses.get(id)) {
            Some(entry) => map_for(entry, &defaults.map),
            None => defaults.map.clone(),
        };
        Self {
            boss,
            map,
            language: defaults.language,
            query: String::new(),
        }
    }

    pub fn apply(&self, event: &Event, bosses: &BossCatalog) -> (Selection, Rerender) {
        match event {
            Event::SelectBoss(id) => self.select_boss(id, bosses),
            Event::SelectMap(name) => self.select_map(name),
            Event::SetLanguage(lang) => self.set_language(*lang),
            Event::SetQuery(text) => self.set_query(text),
        }
    }

    pub fn select_boss(&self, id: &str, bosses: &BossCatalog) -> (Selection, Rerender) {
        let Some(boss) = bosses.get(id) else {
            tracing::debug!(boss = id, "ignoring selection of unknown boss");
            return (self.clone(), Rerender::NONE);
        };
        let next = Selection {
            boss: Some(id.to_string()),
            map: map_for(boss, &self.map),
            ..self.clone()
        };
        (next, Rerender::ALL)
    }

    pub fn select_map(&self, name: &str) -> (Selection, Rerender) {
        let next = Selection {
            map: name.to_string(),
            ..self.clone()
        };
        (next, Rerender::CONTENT)
    }

    pub fn set_language(&self, language: Language) -> (Selection, Rerender) {
        let next = Selection {
            language,
            ..self.clone()
        };
        (next, Rerender::ALL)
    }

    pub fn set_query(&self, query: &str) -> (Selection, Rerender) {
        let next = Selection {
            query: query.to_string(),
            ..self.clone()
        };
        (next, Rerender::LIST)
    }
}

// Keeps the current map when the boss has it; a boss without maps leaves it alone.
fn map_for(boss: &Boss, current: &str) -> String {
    if boss.mode.has_map(current) {
        return current.to_string();
    }
    boss.mode.first_map().unwrap_or(current).to_string()
}
