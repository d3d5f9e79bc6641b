//! Command-line interface definitions for fishgen.
//!
//! This module defines the CLI structure using clap derives and dispatches
//! parsed arguments to the handlers in [`crate::commands`].

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::color::ColorScheme;
use crate::commands::completions::handle_completions_command;
use crate::commands::generate::handle_generate_command;
use crate::commands::inspect::handle_inspect_command;
use crate::commands::version::handle_version_command;

/// fishgen - Generate fish shell completion scripts
#[derive(Debug, Parser)]
#[command(
  name = "fishgen",
  version,
  about = "Generate fish shell completion scripts",
  long_about = "Generates fish shell completion scripts from JSON command definitions.\n\
                Subcommands, flags, required values, and value suggestions are all completed.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute
  #[command(subcommand)]
  pub command: Command,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,
}

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Generate a fish completion script from a JSON command definition
  Generate {
    /// Path to the JSON command definition
    #[arg(value_name = "DEFINITION", value_hint = clap::ValueHint::FilePath)]
    definition: PathBuf,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(long, requires = "output")]
    force: bool,
  },

  /// Validate a definition and list the command paths it describes
  Inspect {
    /// Path to the JSON command definition
    #[arg(value_name = "DEFINITION", value_hint = clap::ValueHint::FilePath)]
    definition: PathBuf,
  },

  /// Display version information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts for fishgen itself
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, global = true, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

impl Cli {
  /// Validate CLI arguments
  ///
  /// Returns an error if the CLI configuration is invalid.
  pub fn validate(&self) -> Result<(), String> {
    match &self.command {
      Command::Generate { definition, output, .. } => {
        if let Some(output) = output
          && output == definition
        {
          return Err("--output must not be the definition file itself".to_string());
        }
        Ok(())
      }
      Command::Version { json, short } if *json && *short => Err("--json and --short cannot be combined".to_string()),
      _ => Ok(()),
    }
  }
}

/// Parse CLI arguments, initialize logging, and dispatch to the chosen
/// command.
pub fn run() {
  let cli = Cli::parse();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  let result = match &cli.command {
    Command::Generate {
      definition,
      output,
      force,
    } => handle_generate_command(definition, output.as_deref(), *force, &colors),
    Command::Inspect { definition } => handle_inspect_command(definition, &colors),
    Command::Version { json, short } => handle_version_command(*json, *short, &colors),
    Command::Completions { shell } => handle_completions_command(*shell),
  };

  if let Err(e) = result {
    eprintln!("{} {:#}", colors.error("Error:"), e);
    process::exit(1);
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
