use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use smart_jump::classifier::{Classifier, SymbolKind};
use smart_jump::config::{Config, DebugOutput};
use smart_jump::dispatch::{CommandRegistry, NavAction, SmartJump};
use smart_jump::document::{Buffer, CursorPosition, DocumentView};
use smart_jump::language::Language;
use smart_jump::paths::PlatformPaths;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "smart-jump",
    version,
    about = "Go to the definition from a reference, list references from a definition"
)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "SMART_JUMP_CONFIG")]
    config: Option<PathBuf>,

    /// Trace which branch each smart jump takes
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide what a smart jump would do at a position in a file
    Classify {
        file: PathBuf,

        /// 1-based line of the cursor
        #[arg(long)]
        line: usize,

        /// 1-based column of the cursor
        #[arg(long, default_value_t = 1)]
        column: usize,

        /// Mode name or language id overriding detection from the file extension
        #[arg(long)]
        language: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the definition rules
    Rules {
        /// Only show rules for this mode name or language id
        #[arg(long)]
        language: Option<String>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct ClassifyReport {
    file: String,
    language: Language,
    line: usize,
    column: usize,
    at_definition: bool,
    kind: Option<SymbolKind>,
    action: NavAction,
    command: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(PlatformPaths::default_config_path);
    let config = load_config(cli.config.as_deref(), cli.debug)?;

    // --debug shows everything; debug = "on" alone shows the dispatch trace
    let level = if cli.debug {
        Level::DEBUG
    } else if config.dispatch.debug.is_on() {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.config
        && !path.exists()
        && !matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { .. } | ConfigAction::Path
            }
        )
    {
        tracing::warn!(
            "Config file {} does not exist; using defaults",
            path.display()
        );
    }

    match cli.command {
        Commands::Classify {
            file,
            line,
            column,
            language,
            json,
        } => classify(&config, &file, line, column, language.as_deref(), json),
        Commands::Rules { language } => {
            print_rules(&Classifier::from_config(&config.classifier), language.as_deref());
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Show => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    );
                }
                Config::default().save(&config_path)?;
                println!("Wrote {}", config_path.display());
                Ok(())
            }
        },
    }
}

/// Config file (explicit or default), then env, then CLI flags
fn load_config(path: Option<&Path>, debug: bool) -> Result<Config> {
    let mut config = match path {
        Some(path) if path.exists() => Config::from_file(path)?,
        Some(_) => Config::default(),
        None => Config::load_or_default()?,
    };
    config.apply_env_overrides();
    if debug {
        config.dispatch.debug = DebugOutput::On;
    }
    config.validate()?;
    Ok(config)
}

fn classify(
    config: &Config,
    file: &Path,
    line: usize,
    column: usize,
    language: Option<&str>,
    json: bool,
) -> Result<()> {
    if line == 0 {
        bail!("--line is 1-based");
    }

    let mut buffer = Buffer::open(file)?;
    if let Some(mode) = language {
        buffer = buffer.with_language(Language::from_mode(mode));
    }
    if line > buffer.line_count() {
        bail!(
            "line {} is past the end of {} ({} lines)",
            line,
            file.display(),
            buffer.line_count()
        );
    }
    let buffer = buffer.with_cursor(CursorPosition::new(line - 1, column.saturating_sub(1)));

    // Stand-in host: the CLI only reports which command would run
    let mut registry = CommandRegistry::new();
    registry.register(
        config.dispatch.definition_command.clone(),
        |_doc: &dyn DocumentView| Ok(()),
    );
    registry.register(
        config.dispatch.references_command.clone(),
        |_doc: &dyn DocumentView| Ok(()),
    );

    let smart_jump = SmartJump::from_config(config);
    let found = smart_jump.classifier().classify(&buffer);
    let action = smart_jump
        .smart_goto(&registry, &buffer)
        .context("smart jump failed")?;
    let command = match action {
        NavAction::FindReferences => &config.dispatch.references_command,
        NavAction::FindDefinitions => &config.dispatch.definition_command,
    };

    let report = ClassifyReport {
        file: file.display().to_string(),
        language: buffer.language(),
        line,
        column,
        at_definition: found.is_some(),
        kind: found.map(|m| m.kind),
        action,
        command: command.clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let what = match report.kind {
            Some(kind) => format!("definition ({})", kind.display_name()),
            None => "reference".to_string(),
        };
        println!(
            "{}:{}:{}: {} [{}] -> {}",
            report.file, report.line, report.column, what, report.language, report.command
        );
    }

    Ok(())
}

fn print_rules(classifier: &Classifier, language: Option<&str>) {
    let languages = match language.map(Language::from_mode) {
        Some(language) => vec![language],
        None => classifier.rules().languages(),
    };

    for language in languages {
        println!("{}:", language);
        let rules = classifier.rules().rules_for(language);
        if rules.is_empty() {
            println!("  (no rules: never a definition)");
        }
        for rule in rules {
            let mut extras = Vec::new();
            if let Some(terminator) = rule.terminator() {
                extras.push(format!("not ending in '{}'", terminator));
            }
            if let Some(window) = rule.block_window() {
                extras.push(format!("'{{' within {} lines", window));
            }
            let extras = if extras.is_empty() {
                String::new()
            } else {
                format!("  [{}]", extras.join(", "))
            };
            println!(
                "  {:<10} {}{}",
                rule.kind().display_name(),
                rule.pattern(),
                extras
            );
        }
    }
}
