use serde::Serialize;

use crate::catalog::ItemCatalog;
use crate::i18n::Language;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedItem<'a> {
    pub name: &'a str,
    pub icon: Option<&'a str>,
}

/// Display name and icon for an item id.
///
/// Ids missing from the catalog resolve to the raw id with no icon so that broken
/// references stay visible instead of disappearing from the guide.
pub fn resolve<'a>(items: &'a ItemCatalog, id: &'a str, lang: Language) -> ResolvedItem<'a> {
    let Some(item) = items.get(id) else {
        return ResolvedItem { name: id, icon: None };
    };
    let name = match item.name.get(lang) {
        "" => id,
        name => name,
    };
    let icon = Some(item.icon.as_str()).filter(|icon| !icon.trim().is_empty());
    ResolvedItem { name, icon }
}
