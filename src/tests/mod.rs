use crate::catalog::{Catalog, CatalogSource, CatalogSources, Category, LoadError, LoadOptions};
use crate::guide::Guide;
use crate::i18n::Language;
use crate::output::{self, report, OutputFormat};
use crate::search::{self, MatchReason};
use crate::state::{Defaults, Event, Rerender, Selection};
use crate::view::{self, ContentBody, NarrativeKind};

const ITEMS: &str = r#"{
    "tek_rifle": { "de": "Tek-Gewehr", "en": "Tek Rifle", "icon": "icons/tek_rifle.png" },
    "tek_helmet": { "en": "Tek Helmet", "icon": "icons/tek_helmet.png" },
    "tek_replicator": { "name": { "de": "Tek-Replikator", "en": "Tek Replicator" }, "icon": "" },
    "spider_flag": { "de": "Spinnenflagge", "en": "Spider Flag", "icon": "icons/spider_flag.png" },
    "artifact_hunter": { "de": "Artefakt des Jägers", "en": "Artifact of the Hunter", "icon": "icons/artifact.png" },
    "element": { "de": "Element", "en": "Element", "icon": "icons/element.png" }
}"#;

const BOSSES: &str = r#"{
    "broodmother": {
        "name": { "de": "Brutmutter", "en": "Broodmother" },
        "desc": { "de": "Eine riesige Spinne.", "en": "A giant spider." },
        "arena": { "en": "A cave deep in the jungle." },
        "strategy": { "de": "Viel Feuerkraft.", "en": "Bring firepower." },
        "icon": "icons/broodmother.png",
        "image": "img/broodmother.jpg",
        "category": "Bosse",
        "maps": {
            "The Island": {
                "Gamma": {
                    "stats": { "hp": 13000, "dmg": 50, "lvl": 30 },
                    "tributes": [ { "id": "artifact_hunter", "q": 1 } ],
                    "loot": [ { "id": "element", "q": 5 } ],
                    "unlocks": [ "tek_helmet" ]
                },
                "Alpha": {
                    "stats": { "hp": 52000, "dmg": 200, "lvl": 70 },
                    "unlocks": [ "tek_rifle" ]
                },
                "Beta": {
                    "stats": { "hp": 26000, "dmg": 100, "lvl": 50 },
                    "unlocks": [ "tek_replicator", "missing_engram" ]
                }
            },
            "Ragnarok": {
                "Gamma": { "stats": { "hp": 13000, "dmg": 50, "lvl": 30 } }
            }
        }
    },
    "megapithecus": {
        "name": { "de": "Megapithecus", "en": "Megapithecus" },
        "desc": { "en": "A giant ape." },
        "strategy": { "en": "Use fast mounts." },
        "category": "Bosse",
        "maps": {
            "The Island": {
                "Gamma": { "unlocks": [ "spider_flag" ] }
            }
        }
    },
    "king_titan": {
        "name": { "de": "Königstitan", "en": "King Titan" },
        "desc": { "en": "The crowned titan." },
        "behavior": { "de": "Stampft.", "en": "Stomps." },
        "strategy": { "en": "Bring a lot of tames." },
        "category": "Titanen",
        "maps": {
            "Extinction": {
                "Gamma": { "unlocks": [ "tek_replicator" ] }
            }
        }
    },
    "rex": {
        "name": { "en": "Rex Alpha" },
        "desc": { "en": "An alpha predator." },
        "strategy": { "en": "Kite it." },
        "category": "Minibosse",
        "hasDiff": false,
        "maps": {
            "Island": {
                "stats": { "hp": 100, "dmg": 10, "lvl": 5 },
                "tributes": [],
                "loot": [],
                "unlocks": []
            }
        }
    },
    "ghost": {
        "name": { "en": "Ghost Rider" },
        "desc": { "en": "Seasonal." },
        "strategy": { "en": "Wait for the event." },
        "category": "Event",
        "hasDiff": false,
        "maps": {}
    }
}"#;

fn catalog() -> Catalog {
    Catalog::from_json(ITEMS, BOSSES).unwrap()
}

fn guide() -> Guide {
    Guide::new(catalog(), &Defaults::default())
}

fn ids(groups: &[search::BossGroup]) -> Vec<&str> {
    groups
        .iter()
        .flat_map(|group| group.entries.iter().map(|entry| entry.id.as_str()))
        .collect()
}

fn html(guide: &Guide) -> String {
    let content = guide.content().unwrap();
    report::render_content(&content, guide.selection().language)
}

#[test]
fn catalog_keeps_document_order_and_tier_mode() {
    let catalog = catalog();
    let order: Vec<&str> = catalog.bosses.iter().map(|(id, _)| id).collect();
    assert_eq!(
        order,
        vec!["broodmother", "megapithecus", "king_titan", "rex", "ghost"]
    );
    assert!(catalog.bosses.get("broodmother").unwrap().is_tiered());
    assert!(!catalog.bosses.get("rex").unwrap().is_tiered());
    assert_eq!(
        catalog.bosses.get("ghost").unwrap().category,
        Category::Other("Event".to_string())
    );
    assert_eq!(
        catalog.bosses.get("rex").unwrap().category,
        Category::MiniBoss
    );
}

#[test]
fn empty_query_lists_every_boss_in_category_order() {
    let groups = search::filter("", Language::De, &catalog());
    let categories: Vec<&str> = groups.iter().map(|g| g.category.key()).collect();
    assert_eq!(
        categories,
        vec!["primary-bosses", "titan-tier", "mini-bosses", "Event"]
    );
    assert_eq!(search::total_entries(&groups), 5);
    assert_eq!(
        ids(&groups),
        vec!["broodmother", "megapithecus", "king_titan", "rex", "ghost"]
    );
    assert!(groups
        .iter()
        .flat_map(|g| g.entries.iter())
        .all(|entry| entry.reason.is_none()));
}

#[test]
fn name_substring_matches_case_insensitively_without_badge() {
    let groups = search::filter("BRUT", Language::De, &catalog());
    assert_eq!(ids(&groups), vec!["broodmother"]);
    let entry = &groups[0].entries[0];
    assert_eq!(entry.reason, Some(MatchReason::Name));
    assert_eq!(entry.badge(Language::De), None);
    assert_eq!(entry.name, "Brutmutter");
}

#[test]
fn name_falls_back_to_reference_language() {
    let groups = search::filter("rex alpha", Language::De, &catalog());
    assert_eq!(ids(&groups), vec!["rex"]);
}

#[test]
fn unlock_only_match_is_tagged() {
    let groups = search::filter("spinnenflagge", Language::De, &catalog());
    assert_eq!(ids(&groups), vec!["megapithecus"]);
    let entry = &groups[0].entries[0];
    assert_eq!(entry.reason, Some(MatchReason::Unlock));
    assert_eq!(entry.badge(Language::De), Some("Tek"));
}

#[test]
fn unlock_search_uses_active_language_names() {
    let de = search::filter("replikator", Language::De, &catalog());
    assert_eq!(ids(&de), vec!["broodmother", "king_titan"]);
    let en = search::filter("replikator", Language::En, &catalog());
    assert!(en.is_empty());
}

#[test]
fn unknown_unlock_ids_are_searchable_by_raw_id() {
    let groups = search::filter("missing_engram", Language::En, &catalog());
    assert_eq!(ids(&groups), vec!["broodmother"]);
}

#[test]
fn tribute_and_loot_are_not_searched() {
    let groups = search::filter("artifact of the hunter", Language::En, &catalog());
    assert!(groups.is_empty());
}

#[test]
fn name_match_wins_over_unlock_match() {
    // "tek" is in a boss name here and in several unlocks
    let catalog = Catalog::from_json(
        ITEMS,
        r#"{ "tek_boss": { "name": { "en": "Tek Overseer" }, "maps": { "Tek Cave": { "Gamma": { "unlocks": ["tek_rifle"] } } } } }"#,
    )
    .unwrap();
    let groups = search::filter("tek", Language::En, &catalog);
    assert_eq!(groups[0].entries[0].reason, Some(MatchReason::Name));
}

#[test]
fn empty_translations_fall_back_to_reference_language() {
    let catalog = Catalog::from_json(
        r#"{ "tek_rifle": { "de": "", "en": "Tek Rifle", "icon": "icons/tek_rifle.png" } }"#,
        r#"{ "dragon": {
            "name": { "de": "", "en": "Dragon" },
            "desc": { "de": "", "en": "Breathes fire." },
            "strategy": { "de": "", "en": "Bring fire resistance." },
            "maps": { "The Island": { "Gamma": { "unlocks": ["tek_rifle"] } } }
        } }"#,
    )
    .unwrap();

    let resolved = crate::resolver::resolve(&catalog.items, "tek_rifle", Language::De);
    assert_eq!(resolved.name, "Tek Rifle");

    let groups = search::filter("", Language::De, &catalog);
    assert_eq!(groups[0].entries[0].name, "Dragon");

    let groups = search::filter("tek rifle", Language::De, &catalog);
    assert_eq!(ids(&groups), vec!["dragon"]);
    assert_eq!(groups[0].entries[0].reason, Some(MatchReason::Unlock));

    let (selection, _) =
        Selection::initial(&catalog.bosses, &Defaults::default()).set_language(Language::De);
    let content = view::build_content(&catalog, &selection).unwrap();
    assert_eq!(content.desc, "Breathes fire.");
}

#[test]
fn single_tier_unlocks_are_searched() {
    let catalog = Catalog::from_json(
        ITEMS,
        r#"{ "rex": {
            "name": { "en": "Rex Alpha" },
            "category": "Minibosse",
            "hasDiff": false,
            "maps": { "Island": { "stats": { "hp": 100 }, "unlocks": ["spider_flag"] } }
        } }"#,
    )
    .unwrap();
    let groups = search::filter("spinnenflagge", Language::De, &catalog);
    assert_eq!(ids(&groups), vec!["rex"]);
    assert_eq!(groups[0].category, Category::MiniBoss);
    assert_eq!(groups[0].entries[0].reason, Some(MatchReason::Unlock));
}

#[test]
fn no_match_yields_no_groups() {
    let groups = search::filter("zzz-no-match", Language::En, &catalog());
    assert!(groups.is_empty());
    assert_eq!(search::total_entries(&groups), 0);
}

#[test]
fn initial_selection_prefers_default_boss() {
    let catalog = catalog();
    let selection = Selection::initial(&catalog.bosses, &Defaults::default());
    assert_eq!(selection.boss.as_deref(), Some("broodmother"));
    assert_eq!(selection.map, "The Island");
    assert_eq!(selection.language, Language::De);
    assert!(selection.query.is_empty());
}

#[test]
fn initial_selection_falls_back_to_first_boss_and_map() {
    let catalog = catalog();
    let defaults = Defaults {
        boss: "does_not_exist".to_string(),
        map: "Nowhere".to_string(),
        language: Language::En,
    };
    let selection = Selection::initial(&catalog.bosses, &defaults);
    assert_eq!(selection.boss.as_deref(), Some("broodmother"));
    assert_eq!(selection.map, "The Island");

    let empty = Catalog::from_json("{}", "{}").unwrap();
    let selection = Selection::initial(&empty.bosses, &defaults);
    assert_eq!(selection.boss, None);
    assert_eq!(selection.map, "Nowhere");
}

#[test]
fn selecting_boss_without_current_map_resets_to_first_map() {
    let mut guide = guide();
    assert_eq!(guide.apply(&Event::SelectMap("Ragnarok".to_string())), Rerender::CONTENT);
    let rerender = guide.apply(&Event::SelectBoss("king_titan".to_string()));
    assert_eq!(rerender, Rerender::ALL);
    assert_eq!(guide.selection().map, "Extinction");
}

#[test]
fn selecting_boss_keeps_map_it_has() {
    let mut guide = guide();
    guide.apply(&Event::SelectBoss("megapithecus".to_string()));
    assert_eq!(guide.selection().map, "The Island");
}

#[test]
fn selecting_unknown_boss_is_a_no_op() {
    let mut guide = guide();
    let before = guide.selection().clone();
    let rerender = guide.apply(&Event::SelectBoss("nobody".to_string()));
    assert_eq!(rerender, Rerender::NONE);
    assert_eq!(guide.selection(), &before);
}

#[test]
fn query_only_rerenders_list_and_keeps_map() {
    let mut guide = guide();
    guide.apply(&Event::SelectMap("Ragnarok".to_string()));
    let rerender = guide.apply(&Event::SetQuery("titan".to_string()));
    assert_eq!(rerender, Rerender::LIST);
    assert_eq!(guide.selection().map, "Ragnarok");
    assert_eq!(ids(&guide.boss_list()), vec!["king_titan"]);
}

#[test]
fn language_switch_round_trips() {
    let mut guide = guide();
    let before = html(&guide);
    let list_before = guide.boss_list();

    assert_eq!(guide.apply(&Event::SetLanguage(Language::En)), Rerender::ALL);
    let english = html(&guide);
    assert_ne!(before, english);
    assert!(english.contains("Bring firepower."));
    assert_eq!(guide.boss_list()[0].entries[0].name, "Broodmother");

    guide.apply(&Event::SetLanguage(Language::De));
    assert_eq!(html(&guide), before);
    assert_eq!(guide.boss_list(), list_before);
}

#[test]
fn single_tier_boss_renders_one_stats_table() {
    let mut guide = guide();
    guide.apply(&Event::SelectBoss("rex".to_string()));
    assert_eq!(guide.selection().map, "Island");

    let content = guide.content().unwrap();
    let ContentBody::Single(view) = &content.body else {
        panic!("expected single layout, got {:?}", content.body);
    };
    assert_eq!(view.tier, None);
    assert_eq!(
        view.stats.as_ref().unwrap().hp.as_ref().unwrap().to_string(),
        "100"
    );

    let out = report::render_content(&content, Language::De);
    assert_eq!(out.matches("stats-table").count(), 1);
    assert!(out.contains(r#"<td class="val hp">100</td>"#));
    assert!(!out.contains("matrix-col"));
    assert!(!out.contains("matrix-header"));
    // tributes, loot and unlocks each fall back to the dash placeholder
    assert_eq!(out.matches(r#"<div class="empty">-</div>"#).count(), 3);
}

#[test]
fn matrix_columns_are_in_ascending_tier_order() {
    let guide = guide();
    let content = guide.content().unwrap();
    let ContentBody::Matrix(views) = &content.body else {
        panic!("expected matrix layout");
    };
    let tiers: Vec<_> = views.iter().map(|v| v.tier.unwrap().key()).collect();
    assert_eq!(tiers, vec!["Gamma", "Beta", "Alpha"]);
    let hp: Vec<String> = views
        .iter()
        .map(|v| v.stats.as_ref().unwrap().hp.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(hp, vec!["13000", "26000", "52000"]);
}

#[test]
fn previous_tiers_notice_only_on_higher_tiers() {
    let guide = guide();
    let content = guide.content().unwrap();
    let ContentBody::Matrix(views) = &content.body else {
        panic!("expected matrix layout");
    };
    let flags: Vec<bool> = views.iter().map(|v| v.previous_tiers_included).collect();
    assert_eq!(flags, vec![false, true, true]);

    let out = report::render_content(&content, Language::De);
    assert_eq!(out.matches("+ Vorherige Stufen").count(), 2);
}

#[test]
fn missing_tier_renders_empty_column() {
    let mut guide = guide();
    guide.apply(&Event::SelectMap("Ragnarok".to_string()));
    let content = guide.content().unwrap();
    let ContentBody::Matrix(views) = &content.body else {
        panic!("expected matrix layout");
    };
    assert_eq!(views.len(), 3);
    assert!(views[0].stats.is_some());
    assert!(views[1].stats.is_none());
    assert!(views[2].unlocks.is_empty());

    let out = report::render_content(&content, Language::De);
    assert!(out.contains(r#"<div class="matrix-col beta">-</div>"#));
}

#[test]
fn item_lines_resolve_names_and_quantities() {
    let mut guide = guide();
    guide.apply(&Event::SetLanguage(Language::En));
    let content = guide.content().unwrap();
    let ContentBody::Matrix(views) = &content.body else {
        panic!("expected matrix layout");
    };
    assert_eq!(views[0].tributes[0].name, "Artifact of the Hunter");
    assert_eq!(views[0].loot[0].quantity, "5");
    assert_eq!(views[1].unlocks[1].name, "missing_engram");
    assert_eq!(views[1].unlocks[1].icon, None);

    let out = report::render_content(&content, Language::En);
    assert!(out.contains(r#"<span class="qty">×5</span>"#));
    assert!(out.contains("missing_engram"));
}

#[test]
fn boss_without_maps_renders_missing_data() {
    let mut guide = guide();
    guide.apply(&Event::SelectBoss("ghost".to_string()));
    let content = guide.content().unwrap();
    assert_eq!(content.body, ContentBody::MissingData);
    assert!(content.maps.is_empty());
    assert_eq!(content.map, None);

    let out = report::render_content(&content, Language::De);
    assert!(out.contains("Daten fehlen."));
    assert!(!out.contains("Strategie"));
    assert!(report::render_map_selector(&content, Language::De).contains("Keine Daten"));
}

#[test]
fn unknown_map_renders_missing_data() {
    let mut guide = guide();
    guide.apply(&Event::SelectMap("Valguero".to_string()));
    assert_eq!(guide.content().unwrap().body, ContentBody::MissingData);
}

#[test]
fn narrative_sections_follow_fixed_order() {
    let mut guide = guide();
    let kinds: Vec<_> = guide
        .content()
        .unwrap()
        .sections
        .iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(kinds, vec![NarrativeKind::Arena, NarrativeKind::Strategy]);
    // arena only has an English text
    assert_eq!(
        guide.content().unwrap().sections[0].text,
        "A cave deep in the jungle."
    );

    guide.apply(&Event::SelectBoss("king_titan".to_string()));
    let kinds: Vec<_> = guide
        .content()
        .unwrap()
        .sections
        .iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(kinds, vec![NarrativeKind::Behavior, NarrativeKind::Strategy]);
}

#[test]
fn content_is_none_without_selection() {
    let catalog = Catalog::from_json("{}", "{}").unwrap();
    let selection = Selection::initial(&catalog.bosses, &Defaults::default());
    assert!(view::build_content(&catalog, &selection).is_none());
}

#[test]
fn boss_list_marks_active_boss_and_badges() {
    let mut guide = guide();
    guide.apply(&Event::SetQuery("spinnenflagge".to_string()));
    guide.apply(&Event::SelectBoss("megapithecus".to_string()));
    let out = report::render_boss_list(
        &guide.boss_list(),
        guide.selection().boss.as_deref(),
        Language::De,
    );
    assert!(out.contains(r#"<button class="boss-btn active" data-boss="megapithecus">"#));
    assert!(out.contains(r#"<span class="match-badge">Tek</span>"#));
    assert!(out.contains("fa-skull"));
}

#[test]
fn html_escapes_catalog_text() {
    let catalog = Catalog::from_json(
        "{}",
        r#"{ "x": { "name": { "en": "<b>X</b>" }, "strategy": { "en": "line one\nline two & more" }, "hasDiff": false, "maps": { "M": {} } } }"#,
    )
    .unwrap();
    let guide = Guide::new(catalog, &Defaults::default());
    let page = String::from_utf8(output::render(OutputFormat::Html, &guide.snapshot()).unwrap()).unwrap();
    assert!(page.contains("&lt;b&gt;X&lt;/b&gt;"));
    assert!(page.contains("line one<br>line two &amp; more"));
    assert!(!page.contains("<b>X</b>"));
}

#[test]
fn json_snapshot_describes_layout() {
    let guide = guide();
    let json: serde_json::Value =
        serde_json::from_slice(&output::render(OutputFormat::Json, &guide.snapshot()).unwrap()).unwrap();
    assert_eq!(json["selection"]["boss"], "broodmother");
    assert_eq!(json["selection"]["language"], "de");
    assert_eq!(json["content"]["body"]["layout"], "matrix");
    assert_eq!(json["groups"][0]["category"], "primary-bosses");
}

#[test]
fn text_output_lists_groups_and_content() {
    let guide = guide();
    let text = String::from_utf8(output::render(OutputFormat::Text, &guide.snapshot()).unwrap()).unwrap();
    assert!(text.contains("== Bosse =="));
    assert!(text.contains(" * Brutmutter (broodmother)"));
    assert!(text.contains("[Gamma]"));
    assert!(text.contains("Leben 13000"));
}

#[test]
fn load_error_page_shows_message() {
    let page = String::from_utf8(report::render_load_error("boom <1>", Language::De)).unwrap();
    assert!(page.contains("Fehler beim Laden der Daten"));
    assert!(page.contains("boom &lt;1&gt;"));
}

#[test]
fn malformed_boss_document_is_a_parse_error() {
    let err = Catalog::from_json(ITEMS, r#"{ "x": { "maps": { "M": [1, 2] } } }"#).unwrap_err();
    assert!(matches!(err, LoadError::Parse { kind: "bosses", .. }));

    let err = Catalog::from_json("not json", BOSSES).unwrap_err();
    assert!(matches!(err, LoadError::Parse { kind: "items", .. }));
}

#[test]
fn audit_reports_contract_violations() {
    let findings = crate::audit::audit(&catalog());
    let rendered: Vec<String> = findings.iter().map(ToString::to_string).collect();
    assert!(rendered.contains(&"ghost: no map data".to_string()));
    assert!(rendered
        .iter()
        .any(|f| f.contains("item 'missing_engram' is not in the item catalog")));
    assert!(!rendered.iter().any(|f| f.starts_with("rex")));
}

#[tokio::test]
async fn load_reads_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let items = dir.path().join("items.json");
    let bosses = dir.path().join("bosses.json");
    tokio::fs::write(&items, ITEMS).await.unwrap();
    tokio::fs::write(&bosses, BOSSES).await.unwrap();

    let sources = CatalogSources {
        items: CatalogSource::FilePath(items.display().to_string()),
        bosses: CatalogSource::FilePath(bosses.display().to_string()),
    };
    let catalog = crate::catalog::load(&sources, &LoadOptions::default())
        .await
        .unwrap();
    assert_eq!(catalog.items.len(), 6);
    assert_eq!(catalog.bosses.len(), 5);
}

#[tokio::test]
async fn load_fails_when_either_source_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let sources = CatalogSources {
        items: CatalogSource::Inline(ITEMS.to_string()),
        bosses: CatalogSource::FilePath(dir.path().join("absent.json").display().to_string()),
    };
    let err = crate::catalog::load(&sources, &LoadOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::FileRead { kind: "bosses", .. }));
}

#[tokio::test]
async fn guide_loads_from_inline_sources() {
    let options = crate::guide::Options {
        sources: CatalogSources {
            items: CatalogSource::Inline(ITEMS.to_string()),
            bosses: CatalogSource::Inline(BOSSES.to_string()),
        },
        ..Default::default()
    };
    let guide = Guide::load(&options).await.unwrap();
    assert_eq!(guide.selection().boss.as_deref(), Some("broodmother"));
}
