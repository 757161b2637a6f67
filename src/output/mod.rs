pub mod report;

use serde::Serialize;

use crate::catalog::Stats;
use crate::i18n::{self, Language, UiKey};
use crate::search::BossGroup;
use crate::state::Selection;
use crate::view::{ContentBody, ContentView, ItemLine, TierView, UnlockLine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Everything needed to draw the guide for one selection.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub selection: Selection,
    pub groups: Vec<BossGroup>,
    pub content: Option<ContentView>,
}

pub fn render(format: OutputFormat, snapshot: &Snapshot) -> Result<Vec<u8>, String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => render_json(snapshot),
        OutputFormat::Html => Ok(report::render_page(snapshot)),
    }
}

pub fn render_json(snapshot: &Snapshot) -> Result<Vec<u8>, String> {
    serde_json::to_vec_pretty(snapshot).map_err(|e| format!("failed to serialize guide as JSON: {e}"))
}

pub fn render_text(snapshot: &Snapshot) -> Vec<u8> {
    let lang = snapshot.selection.language;
    let mut out = render_list_text(&snapshot.groups, snapshot.selection.boss.as_deref(), lang);
    if let Some(content) = snapshot.content.as_ref() {
        out.push('\n');
        out.push_str(&render_content_text(content, lang));
    }
    out.into_bytes()
}

pub fn render_list_text(groups: &[BossGroup], selected: Option<&str>, lang: Language) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("== {} ==\n", group.category.label(lang)));
        for entry in &group.entries {
            let marker = if Some(entry.id.as_str()) == selected { '*' } else { ' ' };
            out.push_str(&format!(" {marker} {} ({})", entry.name, entry.id));
            if let Some(badge) = entry.badge(lang) {
                out.push_str(&format!(" [{badge}]"));
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_content_text(content: &ContentView, lang: Language) -> String {
    let t = |key| i18n::text(key, lang);
    let mut out = String::new();
    out.push_str(&format!("{}\n", content.name));
    if !content.desc.is_empty() {
        out.push_str(&format!("{}\n", content.desc));
    }
    let map = content
        .map
        .as_deref()
        .unwrap_or_else(|| i18n::text(UiKey::NoData, lang));
    out.push_str(&format!(":: {:<10}: {}\n", t(UiKey::Map), map));
    if content.maps.len() > 1 {
        out.push_str(&format!(":: {:<10}: {}\n", "", content.maps.join(", ")));
    }
    out.push('\n');

    match &content.body {
        ContentBody::MissingData => {
            out.push_str(t(UiKey::DataMissing));
            out.push('\n');
            return out;
        }
        ContentBody::Single(view) => out.push_str(&tier_text(view, lang)),
        ContentBody::Matrix(views) => {
            for view in views {
                if let Some(tier) = view.tier {
                    out.push_str(&format!("[{}]\n", tier.label(lang)));
                }
                out.push_str(&tier_text(view, lang));
                out.push('\n');
            }
        }
    }

    for section in &content.sections {
        out.push_str(&format!("\n-- {} --\n", t(section.kind.title_key())));
        out.push_str(&section.text);
        out.push('\n');
    }
    out
}

fn tier_text(view: &TierView, lang: Language) -> String {
    let t = |key| i18n::text(key, lang);
    let mut out = String::new();
    out.push_str(&format!("  {}: {}\n", t(UiKey::Stats), stats_text(view.stats.as_ref(), lang)));
    out.push_str(&format!("  {}: {}\n", t(UiKey::Tribute), items_text(&view.tributes)));
    out.push_str(&format!("  {}: {}\n", t(UiKey::Loot), items_text(&view.loot)));
    let unlocks = unlocks_text(&view.unlocks);
    if view.previous_tiers_included {
        out.push_str(&format!(
            "  {}: {} {}\n",
            t(UiKey::Unlocks),
            t(UiKey::PreviousTiers),
            unlocks
        ));
    } else {
        out.push_str(&format!("  {}: {}\n", t(UiKey::Unlocks), unlocks));
    }
    out
}

fn stats_text(stats: Option<&Stats>, lang: Language) -> String {
    let Some(stats) = stats else {
        return "-".to_string();
    };
    format!(
        "{} {} | {} {} | {} {}",
        i18n::text(UiKey::Hp, lang),
        stat_value(stats.hp.as_ref()),
        i18n::text(UiKey::Dmg, lang),
        stat_value(stats.dmg.as_ref()),
        i18n::text(UiKey::Lvl, lang),
        stat_value(stats.lvl.as_ref()),
    )
}

pub(crate) fn stat_value(value: Option<&crate::catalog::Amount>) -> String {
    value.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

fn items_text(lines: &[ItemLine]) -> String {
    if lines.is_empty() {
        return "-".to_string();
    }
    lines
        .iter()
        .map(|line| format!("{} ×{}", line.name, line.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

fn unlocks_text(lines: &[UnlockLine]) -> String {
    if lines.is_empty() {
        return "-".to_string();
    }
    lines
        .iter()
        .map(|line| line.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
