//! whip CLI entry point
//!
//! Thin glue around the library: resolves flags against the persisted
//! config, hands the recurrence engine a reference date and a log path
//! format, and opens the files it writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Months, NaiveDate};
use clap::{Args, Parser, Subcommand};
use whip::{Config, daily_log, local_date_today, schedule, stats};

/// Recurring daily checklist generator
#[derive(Parser, Debug)]
#[command(name = "whip", version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.whip.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a daily checklist (the default command)
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Get or set config parameters
    #[command(visible_alias = "c")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Export completion stats from past checklists
    #[command(visible_alias = "s")]
    Stats(StatsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Generate(GenerateArgs::default())
    }
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Override date (default is today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Input schedule file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// strftime pattern producing the daily log path
    #[arg(short, long)]
    format: Option<String>,

    /// Skip looking back at yesterday's file for overdue tasks
    #[arg(long)]
    no_yesterday: bool,

    /// Regenerate the file even if it already exists
    #[arg(long)]
    force: bool,

    /// Do not open the generated file in the default editor
    #[arg(long)]
    no_open: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print a config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// Clear a config value
    Unset { key: String },
    /// List all config values
    List,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Stat start date (default is a month ago)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Stat end date, exclusive (default is today)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Input schedule file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// strftime pattern of the daily log files
    #[arg(short, long)]
    format: Option<String>,

    /// Output CSV file
    #[arg(short, long, default_value = "stats.csv")]
    output: PathBuf,

    /// Do not open the stats file in the default viewer
    #[arg(long)]
    no_open: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);

    match cli.command.unwrap_or_default() {
        Commands::Generate(args) => run_generate(args, &config_path),
        Commands::Config { action } => run_config(action, &config_path),
        Commands::Stats(args) => run_stats(args, &config_path),
    }
}

fn run_generate(args: GenerateArgs, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let input = resolve_input(args.input, &config)?;
    let format = resolve_format(args.format, &config)?;
    let date = args.date.unwrap_or_else(local_date_today);

    let groups = schedule::load(&input)?;

    let carry_over = !args.no_yesterday && config.yesterday.unwrap_or(true);
    let prior = if carry_over {
        match date.pred_opt() {
            Some(yesterday) => daily_log::read(yesterday.format(&format).to_string())?,
            None => None,
        }
    } else {
        None
    };

    let header = schedule::materialize(&groups, date, prior.as_ref())?;
    let content = daily_log::encode(&header, date)?;

    let path = PathBuf::from(date.format(&format).to_string());
    if path.exists() && !args.force {
        println!(
            "File {} already exists, pass --force to regenerate it",
            path.display()
        );
    } else {
        daily_log::write(&path, &content)?;
        println!("Generated {}", path.display());
    }

    if !args.no_open && config.open.unwrap_or(true) {
        open::that(&path).with_context(|| format!("failed to open {}", path.display()))?;
    }

    Ok(())
}

fn run_config(action: ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(config_path)?;
            if !Config::KEYS.contains(&key.as_str()) {
                bail!(
                    "unknown config key '{key}' (known keys: {})",
                    Config::KEYS.join(", ")
                );
            }
            println!("{}", config.get(&key).unwrap_or_default());
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(config_path)?;
            config.set(&key, &value)?;
            config.save(config_path)?;
            println!("Set config key \"{key}\" to value \"{value}\"");
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load(config_path)?;
            config.unset(&key)?;
            config.save(config_path)?;
            println!("Cleared config key \"{key}\"");
        }
        ConfigAction::List => {
            let config = Config::load(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

fn run_stats(args: StatsArgs, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let input = resolve_input(args.input, &config)?;
    let format = resolve_format(args.format, &config)?;

    let to = args.to.unwrap_or_else(local_date_today);
    let from = args
        .from
        .unwrap_or_else(|| local_date_today() - Months::new(1));

    let groups = schedule::load(&input)?;
    let csv = stats::collect(&groups, from, to, &format)?;

    fs::write(&args.output, csv)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    if !args.no_open && config.open.unwrap_or(true) {
        open::that(&args.output)
            .with_context(|| format!("failed to open {}", args.output.display()))?;
    }

    Ok(())
}

fn resolve_input(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    flag.or_else(|| config.input.clone().map(PathBuf::from)).context(
        "missing schedule file (pass --input or set it with `whip config set input <path>`)",
    )
}

fn resolve_format(flag: Option<String>, config: &Config) -> Result<String> {
    flag.or_else(|| config.format.clone()).context(
        "missing log path format (pass --format or set it with `whip config set format <pattern>`)",
    )
}
