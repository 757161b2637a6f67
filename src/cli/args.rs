use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bossguide",
    version,
    about = "bilingual boss encounter reference guide",
    long_about = "Bossguide renders a searchable boss encounter guide (stats, tributes, loot, unlocks and strategy per map and difficulty tier) from an item catalog and a boss catalog.\n\nExamples:\n  bossguide --boss dragon --map \"The Island\" --lang en\n  bossguide --query \"tek rifle\" --format json\n  bossguide --items https://host/data/items.json --bosses https://host/data/bosses.json -o guide.html\n  bossguide --interactive\n\nTip: Use --config to persist catalog locations and the initial selection."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored console output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered guide to FILE instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'F',
        long = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'i',
        long = "items",
        value_name = "SOURCE",
        help_heading = "Input",
        help = "Item catalog location, a file path or an http(s) URL."
    )]
    pub items: Option<String>,

    #[arg(
        short = 'b',
        long = "bosses",
        value_name = "SOURCE",
        help_heading = "Input",
        help = "Boss catalog location, a file path or an http(s) URL."
    )]
    pub bosses: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config file (to --config or ~/.bossguide/config.yml) and exit."
    )]
    pub init_config: bool,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        help_heading = "Input",
        help = "Timeout for fetching catalogs over HTTP."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'l',
        long = "lang",
        visible_alias = "language",
        value_name = "CODE",
        help_heading = "Selection",
        help = "Display language (de, en)."
    )]
    pub lang: Option<String>,

    #[arg(
        long = "boss",
        value_name = "ID",
        help_heading = "Selection",
        help = "Boss id to show."
    )]
    pub boss: Option<String>,

    #[arg(
        short = 'm',
        long = "map",
        value_name = "NAME",
        help_heading = "Selection",
        help = "Map to show for the selected boss."
    )]
    pub map: Option<String>,

    #[arg(
        short = 'q',
        long = "query",
        value_name = "TEXT",
        help_heading = "Selection",
        help = "Filter the boss list by name or unlock."
    )]
    pub query: Option<String>,

    #[arg(
        short = 'I',
        long = "interactive",
        help_heading = "Mode",
        help = "Read selection commands from stdin (type 'help' for the list)."
    )]
    pub interactive: bool,

    #[arg(
        long = "audit",
        help_heading = "Mode",
        help = "Report catalog inconsistencies (unknown items, missing reference texts, bosses without maps)."
    )]
    pub audit: bool,
}
