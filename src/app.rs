use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::EnvFilter;

use crate::audit;
use crate::catalog::{CatalogSource, CatalogSources, LoadOptions};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::guide::{self, Guide};
use crate::i18n::Language;
use crate::output::{self, report, OutputFormat};
use crate::state::{Defaults, Event, Rerender, DEFAULT_BOSS, DEFAULT_MAP};

fn print_banner() {
    const BANNER: &str = r#"
    __                                _     __
   / /_  ____  __________ _____ ___  (_)___/ /__
  / __ \/ __ \/ ___/ ___/ __ `/ / / / / __  / _ \
 / /_/ / /_/ (__  |__  ) /_/ / /_/ / / /_/ /  __/
/_.___/\____/____/____/\__, /\__,_/_/\__,_/\___/
                      /____/
       v0.1.0 - boss encounter reference guide
    "#;
    eprint!("{}", BANNER.bold().cyan());
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label.bold(), value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    options: guide::Options,
    query: Option<String>,
    requested_boss: Option<String>,
    output: Option<String>,
    format: OutputFormat,
    no_color: bool,
    interactive: bool,
    audit: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let language_raw = args
        .lang
        .or(cfg.language)
        .unwrap_or_else(|| Language::default().code().to_string());
    let language = language_raw
        .parse::<Language>()
        .map_err(|e| format!("invalid language '{language_raw}': {e}"))?;

    let timeout_seconds = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout_seconds == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let items = args
        .items
        .or(cfg.items)
        .unwrap_or_else(|| "./data/items.json".to_string());
    let bosses = args
        .bosses
        .or(cfg.bosses)
        .unwrap_or_else(|| "./data/bosses.json".to_string());

    let requested_boss = args.boss.clone();
    let boss = args
        .boss
        .or(cfg.boss)
        .unwrap_or_else(|| DEFAULT_BOSS.to_string());
    let map = args
        .map
        .or(cfg.map)
        .unwrap_or_else(|| DEFAULT_MAP.to_string());

    let output = args.output.or(cfg.output);
    let format_raw = args.format.or(cfg.output_format);
    let format = match format_raw.as_deref() {
        Some(raw) => OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json, or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        options: guide::Options {
            sources: CatalogSources {
                items: CatalogSource::parse(&items),
                bosses: CatalogSource::parse(&bosses),
            },
            load: LoadOptions { timeout_seconds },
            defaults: Defaults {
                boss,
                map,
                language,
            },
        },
        query: args.query,
        requested_boss,
        output,
        format,
        no_color,
        interactive: args.interactive,
        audit: args.audit,
        verbose: args.verbose,
    })
}

fn init_logging(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Apply(Event),
    Show,
    List,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line.trim(), ""),
    };
    let command = match verb.to_lowercase().as_str() {
        "boss" | "b" if !rest.is_empty() => Command::Apply(Event::SelectBoss(rest.to_string())),
        "map" | "m" if !rest.is_empty() => Command::Apply(Event::SelectMap(rest.to_string())),
        "lang" | "l" => Command::Apply(Event::SetLanguage(rest.parse::<Language>()?)),
        // an empty search clears the filter
        "search" | "s" => Command::Apply(Event::SetQuery(rest.to_string())),
        "show" => Command::Show,
        "list" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "boss" | "b" | "map" | "m" => return Err(format!("'{verb}' needs an argument")),
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(command))
}

const INTERACTIVE_HELP: &str = "commands:
  boss <id>       select a boss
  map <name>      select a map of the current boss
  lang <code>     switch language (de, en)
  search [text]   filter the boss list (empty clears)
  list            print the boss list
  show            print the selected boss
  quit            leave
";

fn print_rerender(guide: &Guide, rerender: Rerender) {
    let lang = guide.selection().language;
    if rerender.is_none() {
        println!("{}", ":: no change".dimmed());
        return;
    }
    if rerender.list {
        let groups = guide.boss_list();
        print!(
            "{}",
            output::render_list_text(&groups, guide.selection().boss.as_deref(), lang)
        );
        if groups.is_empty() {
            println!("{}", ":: no matches".dimmed());
        }
    }
    if rerender.content {
        if let Some(content) = guide.content() {
            println!();
            print!("{}", output::render_content_text(&content, lang));
        }
    }
}

async fn run_interactive(guide: &mut Guide) -> Result<(), String> {
    print_rerender(guide, Rerender::ALL);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    loop {
        print!("{} ", ">".bold().green());
        std::io::stdout()
            .flush()
            .map_err(|e| format!("failed to flush stdout: {e}"))?;
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("failed to read stdin: {e}"))?
        else {
            break;
        };
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Apply(event))) => {
                let rerender = guide.apply(&event);
                print_rerender(guide, rerender);
            }
            Ok(Some(Command::Show)) => print_rerender(guide, Rerender::CONTENT),
            Ok(Some(Command::List)) => print_rerender(guide, Rerender::LIST),
            Ok(Some(Command::Help)) => print!("{INTERACTIVE_HELP}"),
            Ok(Some(Command::Quit)) => break,
            Err(e) => println!("{} {}", "::".red(), e),
        }
    }
    Ok(())
}

async fn write_output(path: Option<&str>, bytes: &[u8]) -> Result<(), String> {
    match path {
        Some(path) => {
            let path = config::expand_tilde(path);
            tokio::fs::write(&path, bytes)
                .await
                .map_err(|e| format!("failed to write output '{}': {e}", path.display()))
        }
        None => std::io::stdout()
            .write_all(bytes)
            .map_err(|e| format!("failed to write to stdout: {e}")),
    }
}

fn loading_spinner(run: &RunConfig) -> Result<ProgressBar, String> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: Loading :: {spinner} :: {msg}")
            .map_err(|e| format!("failed to build spinner style: {e}"))?,
    );
    pb.set_message(format!(
        "{} + {}",
        run.options.sources.items.describe(),
        run.options.sources.bosses.describe()
    ));
    Ok(pb)
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    init_logging(run.verbose, run.no_color);
    print_banner();

    format_kv_line("Items", run.options.sources.items.describe());
    format_kv_line("Bosses", run.options.sources.bosses.describe());
    format_kv_line("Language", run.options.defaults.language.code());
    eprintln!();

    let pb = loading_spinner(&run)?;
    let loaded = Guide::load(&run.options).await;
    pb.finish_and_clear();

    let mut guide = match loaded {
        Ok(guide) => guide,
        Err(e) => {
            let message = e.to_string();
            tracing::error!(error = %message, "catalog load failed");
            if run.format == OutputFormat::Html && run.output.is_some() {
                let page = report::render_load_error(&message, run.options.defaults.language);
                write_output(run.output.as_deref(), &page).await?;
            }
            return Err(message);
        }
    };

    let loaded_summary = format!(
        "{} items, {} bosses",
        guide.catalog().items.len(),
        guide.catalog().bosses.len()
    );
    format_kv_line("Loaded", &loaded_summary);

    if let Some(boss) = run.requested_boss.as_deref() {
        if !guide.catalog().bosses.contains(boss) {
            tracing::warn!(boss, "requested boss is not in the catalog");
        }
    }

    if run.audit {
        let findings = audit::audit(guide.catalog());
        format_kv_line("Audit", &format!("{} finding(s)", findings.len()));
        for finding in &findings {
            eprintln!("{} {}", "::".yellow(), finding);
        }
        eprintln!();
    }

    if let Some(query) = run.query.as_deref() {
        guide.apply(&Event::SetQuery(query.to_string()));
    }

    if run.interactive {
        return run_interactive(&mut guide).await;
    }

    let bytes = output::render(run.format, &guide.snapshot())?;
    write_output(run.output.as_deref(), &bytes).await?;
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Written", path);
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                let mut cmd = CliArgs::command();
                print!("{}", cmd.render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.init_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!(":: Config    : {}", path.display());
        return Ok(());
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
