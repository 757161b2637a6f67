use super::{escape_html, stat_value, Snapshot};
use crate::catalog::Stats;
use crate::i18n::{self, Language, UiKey};
use crate::search::BossGroup;
use crate::view::{ContentBody, ContentView, ItemLine, TierView, UnlockLine};

const EMPTY_PLACEHOLDER: &str = r#"<div class="empty">-</div>"#;

fn text_block(value: &str) -> String {
    escape_html(value).replace("\r\n", "\n").replace('\n', "<br>")
}

fn img(src: Option<&str>) -> String {
    format!(r#"<img src="{}" alt="">"#, escape_html(src.unwrap_or_default()))
}

pub fn render_boss_list(groups: &[BossGroup], selected: Option<&str>, lang: Language) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            r#"<div class="cat-header"><i class="fa-solid {}"></i> {}</div>"#,
            group.category.icon(),
            escape_html(group.category.label(lang))
        ));
        out.push('\n');
        for entry in &group.entries {
            let active = if Some(entry.id.as_str()) == selected {
                " active"
            } else {
                ""
            };
            out.push_str(&format!(
                r#"<button class="boss-btn{active}" data-boss="{}">{} {}"#,
                escape_html(&entry.id),
                img(Some(entry.icon.as_str())),
                escape_html(&entry.name)
            ));
            if let Some(badge) = entry.badge(lang) {
                out.push_str(&format!(r#"<span class="match-badge">{badge}</span>"#));
            }
            out.push_str("</button>\n");
        }
    }
    out
}

pub fn render_header(content: &ContentView) -> String {
    let mut out = String::new();
    if let Some(image) = content.image.as_deref() {
        out.push_str(&format!(
            r#"<div class="boss-main-image-container"><img src="{}" class="boss-main-image" alt=""></div>"#,
            escape_html(image)
        ));
    }
    out.push_str(&format!(
        r#"<div class="boss-info"><h1>{}</h1><p>{}</p></div>"#,
        escape_html(&content.name),
        text_block(&content.desc)
    ));
    out
}

pub fn render_map_selector(content: &ContentView, lang: Language) -> String {
    let mut out = String::from(r#"<select id="mapSelector">"#);
    if content.maps.is_empty() {
        out.push_str(&format!(
            "<option>{}</option>",
            i18n::text(UiKey::NoData, lang)
        ));
    }
    for map in &content.maps {
        let selected = if content.map.as_deref() == Some(map.as_str()) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<option value="{0}"{selected}>{0}</option>"#,
            escape_html(map)
        ));
    }
    out.push_str("</select>");
    out
}

fn render_stats(stats: Option<&Stats>, lang: Language) -> String {
    let Some(stats) = stats else {
        return "-".to_string();
    };
    let row = |key, class: &str, value: Option<&crate::catalog::Amount>| {
        format!(
            r#"<tr><td>{}</td><td class="val {class}">{}</td></tr>"#,
            i18n::text(key, lang),
            escape_html(&stat_value(value))
        )
    };
    format!(
        r#"<table class="stats-table">{}{}{}</table>"#,
        row(UiKey::Hp, "hp", stats.hp.as_ref()),
        row(UiKey::Dmg, "dmg", stats.dmg.as_ref()),
        row(UiKey::Lvl, "lvl", stats.lvl.as_ref()),
    )
}

fn render_item_list(lines: &[ItemLine]) -> String {
    if lines.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    lines
        .iter()
        .map(|line| {
            let name = escape_html(&line.name);
            format!(
                r#"<div class="item-entry" title="{name}"><div class="item-left">{}<span>{name}</span></div><span class="qty">×{}</span></div>"#,
                img(line.icon.as_deref()),
                escape_html(&line.quantity)
            )
        })
        .collect()
}

fn render_unlocks(lines: &[UnlockLine], previous_tiers: bool, lang: Language) -> String {
    let mut out = String::new();
    if previous_tiers {
        out.push_str(&format!(
            r#"<div class="note">{}</div>"#,
            i18n::text(UiKey::PreviousTiers, lang)
        ));
    }
    if lines.is_empty() {
        out.push_str(EMPTY_PLACEHOLDER);
        return out;
    }
    for line in lines {
        out.push_str(&format!(
            r#"<div class="tek-tag">{} {}</div>"#,
            img(line.icon.as_deref()),
            escape_html(&line.name)
        ));
    }
    out
}

fn section_title(icon: &str, key: UiKey, lang: Language) -> String {
    format!(
        r#"<div class="section-title"><i class="fa-solid {icon}"></i> {}</div>"#,
        i18n::text(key, lang)
    )
}

fn render_single(view: &TierView, lang: Language) -> String {
    format!(
        r#"<div class="single-view">
  <div class="single-col">
    {}{}
    {}<div class="item-list">{}</div>
  </div>
  <div class="single-col">
    {}<div class="item-list">{}</div>
    {}<div class="tek-unlocks">{}</div>
  </div>
</div>
"#,
        section_title("fa-chart-line", UiKey::Stats, lang),
        render_stats(view.stats.as_ref(), lang),
        section_title("fa-gem", UiKey::Tribute, lang),
        render_item_list(&view.tributes),
        section_title("fa-gift", UiKey::Loot, lang),
        render_item_list(&view.loot),
        section_title("fa-dna", UiKey::Unlocks, lang),
        render_unlocks(&view.unlocks, false, lang),
    )
}

fn matrix_row(views: &[TierView], cell: impl Fn(&TierView) -> String) -> String {
    let mut out = String::from(r#"<div class="matrix-row">"#);
    for view in views {
        let class = view.tier.map(|tier| tier.css_class()).unwrap_or_default();
        out.push_str(&format!(
            r#"<div class="matrix-col {class}">{}</div>"#,
            cell(view)
        ));
    }
    out.push_str("</div>");
    out
}

fn render_matrix(views: &[TierView], lang: Language) -> String {
    let mut out = String::from(r#"<div class="matrix-header">"#);
    for tier in views.iter().filter_map(|view| view.tier) {
        out.push_str(&format!(
            r#"<div class="mh-col mh-{}">{}</div>"#,
            tier.css_class(),
            tier.label(lang)
        ));
    }
    out.push_str("</div>\n");

    let block = |icon: &str, key: UiKey, row: String| {
        format!(
            "<div class=\"section-block\">{}{}</div>\n",
            section_title(icon, key, lang),
            row
        )
    };
    out.push_str(&block(
        "fa-chart-line",
        UiKey::Stats,
        matrix_row(views, |view| render_stats(view.stats.as_ref(), lang)),
    ));
    out.push_str(&block(
        "fa-gem",
        UiKey::Tribute,
        matrix_row(views, |view| {
            format!(r#"<div class="item-list">{}</div>"#, render_item_list(&view.tributes))
        }),
    ));
    out.push_str(&block(
        "fa-gift",
        UiKey::Loot,
        matrix_row(views, |view| {
            format!(r#"<div class="item-list">{}</div>"#, render_item_list(&view.loot))
        }),
    ));
    out.push_str(&block(
        "fa-dna",
        UiKey::Unlocks,
        matrix_row(views, |view| {
            format!(
                r#"<div class="tek-unlocks">{}</div>"#,
                render_unlocks(&view.unlocks, view.previous_tiers_included, lang)
            )
        }),
    ));
    out
}

/// The detail area below the map selector.
pub fn render_content(content: &ContentView, lang: Language) -> String {
    let mut out = match &content.body {
        ContentBody::MissingData => {
            return format!(
                r#"<div class="strategy-box">{}</div>"#,
                i18n::text(UiKey::DataMissing, lang)
            );
        }
        ContentBody::Single(view) => render_single(view, lang),
        ContentBody::Matrix(views) => render_matrix(views, lang),
    };
    for section in &content.sections {
        out.push_str(&format!(
            "<div class=\"section-block\">{}<div class=\"strategy-box\">{}</div></div>\n",
            section_title(section.kind.icon(), section.kind.title_key(), lang),
            text_block(&section.text)
        ));
    }
    out
}

fn render_language_switch(active: Language) -> String {
    Language::ALL
        .into_iter()
        .map(|lang| {
            let class = if lang == active { " active" } else { "" };
            format!(
                r#"<button class="lang-btn{class}" id="btn-{}" data-lang="{}">{}</button>"#,
                lang.code(),
                lang.code(),
                lang.label()
            )
        })
        .collect()
}

fn page(lang: Language, sidebar: &str, main: &str) -> Vec<u8> {
    format!(
        r####"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Boss Guide</title>
  <link href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" rel="stylesheet"/>
  <link href="style.css" rel="stylesheet"/>
</head>
<body>
  <div class="guide">
    <aside class="sidebar">
{sidebar}
    </aside>
    <main class="main">
{main}
    </main>
  </div>
</body>
</html>
"####,
        lang = lang.code()
    )
    .into_bytes()
}

pub fn render_page(snapshot: &Snapshot) -> Vec<u8> {
    let lang = snapshot.selection.language;
    let sidebar = format!(
        r#"<div class="lang-switch">{}</div>
<input id="searchInput" type="text" placeholder="{}" value="{}"/>
<div id="bossList">
{}</div>"#,
        render_language_switch(lang),
        i18n::text(UiKey::SearchPlaceholder, lang),
        escape_html(&snapshot.selection.query),
        render_boss_list(
            &snapshot.groups,
            snapshot.selection.boss.as_deref(),
            lang
        )
    );
    let main = match snapshot.content.as_ref() {
        Some(content) => format!(
            "<div id=\"bossHeader\">{}</div>\n{}\n<div id=\"mainContent\">\n{}</div>",
            render_header(content),
            render_map_selector(content, lang),
            render_content(content, lang)
        ),
        None => format!(
            r#"<div id="mainContent"><div class="strategy-box">{}</div></div>"#,
            i18n::text(UiKey::NoData, lang)
        ),
    };
    page(lang, &sidebar, &main)
}

/// Shown instead of the guide when the catalog could not be loaded.
pub fn render_load_error(message: &str, lang: Language) -> Vec<u8> {
    let main = format!(
        r#"<div id="mainContent"><div class="strategy-box load-error">{}<br>{}</div></div>"#,
        i18n::text(UiKey::LoadFailed, lang),
        escape_html(message)
    );
    page(lang, "", &main)
}
