//! CLI command definitions and handlers

mod river;

use crate::config::{DisplayConfig, UserConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate the hash length (4-40)
fn parse_hash_length(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 4 {
        Err("hash length must be at least 4".to_string())
    } else if n > 40 {
        Err("hash length cannot exceed 40".to_string())
    } else {
        Ok(n)
    }
}

/// rivera - display the git river, like git-forest
#[derive(Parser, Debug)]
#[command(name = "rivera")]
#[command(
    version,
    about = "Display the git river: one lane per branch, with forks and merges drawn between them",
    after_help = "\
Examples:
  rivera                               River of the current repository from HEAD
  rivera -r ../other --all             Every branch, remote branch and tag
  rivera -n 50 -l 12                   Last 50 commits with 12-character hashes
  rivera --reverse                     Oldest commit first
  rivera --branch-colors 'red,green'   Custom lane colors"
)]
pub struct Cli {
    /// Repository path to use
    #[arg(
        short = 'r',
        long = "repository",
        visible_alias = "repo",
        global = true,
        default_value = "."
    )]
    pub path: PathBuf,

    /// Length of the commit hash (4-40)
    #[arg(short = 'l', long, value_parser = parse_hash_length)]
    pub hash_length: Option<usize>,

    /// Display all branches
    #[arg(long)]
    pub all: bool,

    /// Force color output (useful for piping)
    #[arg(long)]
    pub force_color: bool,

    /// Reverse the display (oldest commit first)
    #[arg(long)]
    pub reverse: bool,

    /// Comma separated lane colors: "#rrggbb", 0-255, or names like "red"
    #[arg(long, env = "RIVERA_BRANCH_COLORS")]
    pub branch_colors: Option<String>,

    /// Show at most this many commits
    #[arg(short = 'n', long)]
    pub max_count: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { action }) => run_config(action),
        None => {
            let mut config = UserConfig::load();
            config.merge(cli.overrides());
            let options = river::RiverOptions {
                max_count: cli.max_count,
                reverse: cli.reverse,
                force_color: cli.force_color,
            };
            river::run(&cli.path, &config, &options)
        }
    }
}

impl Cli {
    /// Settings given on the command line (or via env), layered over the config file.
    fn overrides(&self) -> UserConfig {
        UserConfig {
            display: DisplayConfig {
                branch_colors: self.branch_colors.clone(),
                hash_length: self.hash_length,
                date_format: None,
                all: self.all.then_some(true),
            },
        }
    }
}

fn run_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config()?;
            println!("Config initialized at: {}", path.display());
            Ok(())
        }
        ConfigAction::Show => show_config(),
    }
}

fn show_config() -> Result<()> {
    let config = UserConfig::load();
    if let Some(user_path) = UserConfig::user_config_path() {
        let status = if user_path.exists() {
            "(found)"
        } else {
            "(not found)"
        };
        println!("Config: {} {}", user_path.display(), status);
    }
    println!("  branch_colors = {}", config.branch_colors());
    println!("  hash_length   = {}", config.hash_length());
    println!("  date_format   = {}", config.date_format());
    println!("  all           = {}", config.all());
    Ok(())
}
