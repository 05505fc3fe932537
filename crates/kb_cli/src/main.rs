//! Kabaddi CLI
//!
//! 경기 설정 + 명령 스크립트 재생 도구
//! Setup JSON → command replay → summary / snapshot JSON

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use kb_core::{KabaddiMatch, MatchCommand, MatchSetup, RuleConfig};
#[cfg(feature = "cli")]
use std::cell::RefCell;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use std::rc::Rc;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "kabaddi")]
#[command(about = "Replay and validate Kabaddi scoring scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Replay a command script against a match setup
    Run {
        /// Match setup JSON file
        #[arg(long)]
        setup: PathBuf,

        /// JSON array of commands
        #[arg(long)]
        commands: PathBuf,

        /// Rule config file (JSON, or YAML by extension)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Abort on the first rejected command
        #[arg(long, default_value = "false")]
        strict: bool,

        /// Print the final snapshot instead of the summary
        #[arg(long, default_value = "false")]
        snapshot: bool,
    },

    /// Validate a setup (and optional rule config) without playing
    Validate {
        #[arg(long)]
        setup: PathBuf,

        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Print the JSON Schema of the command format
    Schema,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { setup, commands, rules, strict, snapshot } => {
            let m = load_match(&setup, rules.as_deref())?;
            let script = std::fs::read_to_string(&commands)
                .with_context(|| format!("reading {}", commands.display()))?;
            let commands = MatchCommand::list_from_json(&script)
                .with_context(|| format!("parsing {}", commands.display()))?;

            let report = replay(m, commands, strict)?;
            for rejection in &report.rejections {
                eprintln!("⚠️  {rejection}");
            }

            let output = if snapshot {
                serde_json::to_string_pretty(&report.game.snapshot())?
            } else {
                serde_json::to_string_pretty(&report.game.summary())?
            };
            println!("{output}");
        }

        Commands::Validate { setup, rules } => {
            let m = load_match(&setup, rules.as_deref())?;
            let teams = m.teams();
            println!("✅ Setup is valid");
            println!("   {} vs {}", teams.home.name, teams.away.name);
            println!("   Half: {}", m.snapshot().match_clock.text);
        }

        Commands::Schema => {
            println!("{}", kb_core::command_schema_json());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_match(setup_path: &Path, rules_path: Option<&Path>) -> Result<KabaddiMatch> {
    let setup_json = std::fs::read_to_string(setup_path)
        .with_context(|| format!("reading {}", setup_path.display()))?;
    let setup = MatchSetup::from_json(&setup_json)?;

    let config = match rules_path {
        Some(path) => RuleConfig::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => RuleConfig::standard(),
    };

    Ok(KabaddiMatch::with_config(&setup, config)?)
}

#[cfg(feature = "cli")]
struct ReplayReport {
    game: KabaddiMatch,
    rejections: Vec<String>,
}

/// Apply every command in order. `tick` commands go through a
/// `TickScheduler` subscription; everything else is applied directly.
#[cfg(feature = "cli")]
fn replay(m: KabaddiMatch, commands: Vec<MatchCommand>, strict: bool) -> Result<ReplayReport> {
    let game = Rc::new(RefCell::new(m));
    let mut rejections = Vec::new();

    {
        let mut scheduler = kb_core::engine::TickScheduler::new();
        let ticking = Rc::clone(&game);
        scheduler.on_tick(move |_| {
            ticking.borrow_mut().tick();
        });

        for (step, command) in commands.into_iter().enumerate() {
            if let MatchCommand::Tick { seconds } = command {
                scheduler.advance(seconds);
                continue;
            }

            let name = command.name();
            if let Err(e) = game.borrow_mut().apply(command) {
                if strict {
                    anyhow::bail!("❌ command #{} ({}) rejected: {}", step + 1, name, e);
                }
                rejections.push(format!("command #{} ({}) rejected: {}", step + 1, name, e));
            }
        }
    }

    let game = Rc::try_unwrap(game)
        .map_err(|_| anyhow::anyhow!("tick subscription still holds the match"))?
        .into_inner();
    Ok(ReplayReport { game, rejections })
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("kabaddi CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
