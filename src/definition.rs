//! JSON command definitions.
//!
//! A definition document describes a command tree without any Rust code:
//!
//! ```json
//! {
//!   "name": "tool",
//!   "help": "Does things",
//!   "options": [
//!     { "names": ["--output", "-o"], "arity": 1, "completion": "path" }
//!   ],
//!   "subcommands": [
//!     { "name": "run", "arguments": [{ "completion": { "fixed": ["fast", "slow"] } }] }
//!   ]
//! }
//! ```
//!
//! Documents are deserialized into the `*Definition` types below, validated,
//! and converted into a [`CommandNode`] tree.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{CommandNode, CommandOption, CompletionCandidates, PositionalArg, ShellType, is_completion_flag};

/// A command as written in a definition document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDefinition {
  pub name: String,
  #[serde(default)]
  pub help: String,
  #[serde(default)]
  pub options: Vec<OptionDefinition>,
  #[serde(default)]
  pub arguments: Vec<ArgumentDefinition>,
  #[serde(default)]
  pub subcommands: Vec<CommandDefinition>,
}

/// An option as written in a definition document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDefinition {
  pub names: Vec<String>,
  #[serde(default)]
  pub hidden: bool,
  #[serde(default)]
  pub arity: usize,
  #[serde(default)]
  pub help: String,
  #[serde(default)]
  pub completion: CandidateDefinition,
}

/// A positional argument as written in a definition document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentDefinition {
  #[serde(default)]
  pub help: String,
  #[serde(default)]
  pub completion: CandidateDefinition,
}

/// Serialized form of [`CompletionCandidates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateDefinition {
  #[default]
  None,
  Path,
  Hostname,
  Username,
  /// Literal values.
  Fixed(Vec<String>),
  /// A shell command whose output lists the candidates.
  Command(String),
  /// Raw per-shell expressions, embedded as-is.
  Custom(CustomDefinition),
}

/// Per-shell expressions for a custom completion. Missing shells render as
/// an empty expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomDefinition {
  #[serde(default)]
  pub fish: Option<String>,
  #[serde(default)]
  pub bash: Option<String>,
}

impl From<CandidateDefinition> for CompletionCandidates {
  fn from(definition: CandidateDefinition) -> Self {
    match definition {
      CandidateDefinition::None => CompletionCandidates::None,
      CandidateDefinition::Path => CompletionCandidates::Path,
      CandidateDefinition::Hostname => CompletionCandidates::Hostname,
      CandidateDefinition::Username => CompletionCandidates::Username,
      CandidateDefinition::Fixed(values) => CompletionCandidates::Fixed(values),
      CandidateDefinition::Command(command) => CompletionCandidates::from_stdout(command),
      CandidateDefinition::Custom(CustomDefinition { fish, bash }) => {
        CompletionCandidates::custom(move |shell| match shell {
          ShellType::Fish => fish.clone().unwrap_or_default(),
          ShellType::Bash => bash.clone().unwrap_or_default(),
        })
      }
    }
  }
}

impl From<OptionDefinition> for CommandOption {
  fn from(definition: OptionDefinition) -> Self {
    CommandOption::new(definition.names)
      .hidden(definition.hidden)
      .arity(definition.arity)
      .help(definition.help)
      .completion(definition.completion.into())
  }
}

impl From<ArgumentDefinition> for PositionalArg {
  fn from(definition: ArgumentDefinition) -> Self {
    PositionalArg::new()
      .help(definition.help)
      .completion(definition.completion.into())
  }
}

impl CommandDefinition {
  /// Check names across the whole tree.
  ///
  /// # Errors
  /// Returns an error naming the offending command path if a command name is
  /// empty or contains whitespace, or if two siblings share a name.
  pub fn validate(&self) -> Result<()> {
    self.validate_at(&[])
  }

  fn validate_at(&self, parents: &[&str]) -> Result<()> {
    let path = if parents.is_empty() {
      self.name.clone()
    } else {
      format!("{} {}", parents.join(" "), self.name)
    };

    if self.name.is_empty() {
      if parents.is_empty() {
        bail!("Root command name must not be empty");
      }
      bail!("Subcommand of '{}' has an empty name", parents.join(" "));
    }
    if self.name.chars().any(char::is_whitespace) {
      bail!("Command name '{path}' must not contain whitespace");
    }

    for option in &self.options {
      if !option.names.iter().any(|name| is_completion_flag(name)) {
        warn!(
          "Option {:?} of '{path}' has no usable flag name and will not be completed",
          option.names
        );
      }
    }

    let mut seen = HashSet::new();
    for subcommand in &self.subcommands {
      if !seen.insert(subcommand.name.as_str()) {
        bail!("Duplicate subcommand '{}' under '{path}'", subcommand.name);
      }
    }

    let mut chain = parents.to_vec();
    chain.push(&self.name);
    for subcommand in &self.subcommands {
      subcommand.validate_at(&chain)?;
    }

    Ok(())
  }

  /// Convert into a [`CommandNode`] tree without validating.
  pub fn into_command(self) -> CommandNode {
    CommandNode {
      name: self.name,
      help: self.help,
      options: self.options.into_iter().map(Into::into).collect(),
      arguments: self.arguments.into_iter().map(Into::into).collect(),
      subcommands: self.subcommands.into_iter().map(CommandDefinition::into_command).collect(),
    }
  }
}

/// Parse and validate a definition document.
///
/// # Errors
/// Returns an error if the JSON is malformed or fails validation.
pub fn parse_definition(json: &str) -> Result<CommandNode> {
  let definition: CommandDefinition = serde_json::from_str(json).context("Failed to parse command definition")?;
  definition.validate()?;

  let command = definition.into_command();
  debug!("Loaded definition for {} ({} commands)", command.name, command.count_nodes());
  Ok(command)
}

/// Read, parse and validate the definition stored at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or [`parse_definition`] fails.
pub fn load_definition(path: &Path) -> Result<CommandNode> {
  let json = fs::read_to_string(path).with_context(|| format!("Failed to read definition {}", path.display()))?;
  parse_definition(&json).with_context(|| format!("Invalid definition {}", path.display()))
}
