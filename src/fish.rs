//! Fish shell completion script generation.
//!
//! Walks a [`CommandNode`] tree depth-first and emits `complete` directives
//! for every command, option, and positional argument. Subcommands are guarded
//! with `__fish_seen_subcommand_from` checks against per-command variables
//! holding each command's child names, so completions for a nested command
//! only show up once that command has been typed.
//!
//! # Example
//! ```
//! use fishgen::fish::generate_fish_completion;
//! use fishgen::model::{CommandNode, CommandOption};
//!
//! let tool = CommandNode::new("tool").option(CommandOption::new(["--foo"]));
//! let script = generate_fish_completion(&tool);
//! assert!(script.contains("complete -c tool -l foo\n"));
//! ```

use tracing::{debug, trace};

use crate::model::{CommandNode, CommandOption, CompletionCandidates, ShellType, is_completion_flag};
use crate::quoting::{escape_double_quoted, escape_single_quoted};

/// Suffix appended to the per-command subcommand-set variable.
const SUBCOMMANDS_VAR_SUFFIX: &str = "_subcommands";

/// Render a complete fish completion script for `root`.
///
/// # Arguments
/// * `root` - Top-level command of the tree to complete.
///
/// # Returns
/// The script text, or an empty string when the root has nothing to complete
/// (no arguments, no subcommands, and no visible dash-prefixed option).
pub fn generate_fish_completion(root: &CommandNode) -> String {
  if !has_completion_requirements(root) {
    debug!("Nothing to complete for {}, skipping fish script", root.name);
    return String::new();
  }

  debug!(
    "Generating fish completion for {} ({} commands)",
    root.name,
    root.count_nodes()
  );

  let mut script = String::new();
  render_command(root, &[], &mut script);
  script
}

fn has_completion_requirements(command: &CommandNode) -> bool {
  !command.arguments.is_empty()
    || !command.subcommands.is_empty()
    || command.options.iter().any(CommandOption::is_completable)
}

/// Where a command sits in the tree, as needed to build its directives.
struct CommandScope<'a> {
  root_name: &'a str,
  name: &'a str,
  is_top_level: bool,
  subcommands_var: Option<String>,
}

impl CommandScope<'_> {
  /// Start of a `complete` line for this command's options and arguments.
  fn complete_call(&self) -> String {
    let mut call = format!("complete -c {}", self.root_name);

    if self.is_top_level {
      if let Some(var) = &self.subcommands_var {
        call.push_str(&format!(" -n \"not __fish_seen_subcommand_from ${var}\""));
      }
    } else {
      call.push_str(&format!(" -n \"__fish_seen_subcommand_from {}\"", self.name));
    }

    call
  }
}

/// Append the script section for `command` and then for each subcommand.
///
/// # Arguments
/// * `command` - Node being rendered.
/// * `parents` - Names from the root down to the immediate parent; empty for
///   the root itself.
/// * `script` - Output buffer shared across the traversal.
fn render_command(command: &CommandNode, parents: &[&str], script: &mut String) {
  let name = command.name.as_str();
  let root_name = parents.first().copied().unwrap_or(name);
  let has_subcommands = !command.subcommands.is_empty();

  let mut chain = parents.to_vec();
  chain.push(name);

  let scope = CommandScope {
    root_name,
    name,
    is_top_level: parents.is_empty(),
    subcommands_var: has_subcommands.then(|| subcommands_var_name(&chain)),
  };

  debug!("Rendering fish completion for {}", chain.join(" "));

  if scope.is_top_level {
    script.push_str(&format!("# Command completion for {name}\n"));
    script.push_str("# Generated by fishgen\n");
  }

  if has_subcommands || !scope.is_top_level {
    script.push_str(&format!("\n\n### Setup for {name}\n"));
  }

  if let Some(var) = &scope.subcommands_var {
    let names = command
      .subcommands
      .iter()
      .map(|subcommand| subcommand.name.as_str())
      .collect::<Vec<_>>()
      .join(" ");
    script.push_str(&format!("set -l {var} '{}'\n", escape_single_quoted(&names)));
  }

  if let Some(parent_name) = parents.last() {
    script.push_str(&format!("complete -c {root_name} -f"));

    if parents.len() == 1 {
      script.push_str(" -n __fish_use_subcommand");
    } else {
      let parent_var = subcommands_var_name(parents);
      script.push_str(&format!(
        " -n \"__fish_seen_subcommand_from {parent_name}; and not __fish_seen_subcommand_from ${parent_var}\""
      ));
    }

    script.push_str(&format!(" -a {name}"));
    push_help(script, &command.help);
    script.push('\n');
  }

  render_options(command, &scope, script);
  render_arguments(command, &scope, script);

  for subcommand in &command.subcommands {
    render_command(subcommand, &chain, script);
  }
}

fn render_options(command: &CommandNode, scope: &CommandScope, script: &mut String) {
  if command.options.iter().any(CommandOption::is_completable) {
    script.push_str(&format!("\n## Options for {}\n", scope.name));
  }

  for option in &command.options {
    if option.hidden {
      trace!("Skipping hidden option {:?} of {}", option.names, scope.name);
      continue;
    }

    for dropped in option.names.iter().filter(|name| !is_completion_flag(name)) {
      trace!("Dropping non-flag name {dropped:?} of an option of {}", scope.name);
    }

    let names: Vec<&str> = option.completion_names().collect();
    if names.is_empty() {
      continue;
    }

    let mut line = scope.complete_call();

    for flag in names {
      line.push(' ');
      line.push_str(flag_switch(flag));
      line.push(' ');
      line.push_str(flag.trim_start_matches('-'));
    }

    if option.arity > 0 {
      line.push_str(" -r");
    }

    push_value_completion(&mut line, &option.completion);
    push_help(&mut line, &option.help);
    line.push('\n');
    script.push_str(&line);
  }
}

fn render_arguments(command: &CommandNode, scope: &CommandScope, script: &mut String) {
  if !command.arguments.is_empty() {
    script.push_str(&format!("\n## Arguments for {}\n", scope.name));
  }

  for argument in &command.arguments {
    let mut line = scope.complete_call();
    push_value_completion(&mut line, &argument.completion);
    push_help(&mut line, &argument.help);
    line.push('\n');
    script.push_str(&line);
  }
}

/// The `complete` switch describing how fish should match `flag`.
///
/// `--name` is a long option, `-n` a short one, and anything else starting
/// with a single dash an old-style option such as `-name`.
fn flag_switch(flag: &str) -> &'static str {
  if flag.starts_with("--") {
    "-l"
  } else if flag.chars().count() == 2 {
    "-s"
  } else {
    "-o"
  }
}

/// Append the value-suggestion fragment for `completion`, if any.
fn push_value_completion(line: &mut String, completion: &CompletionCandidates) {
  match completion {
    CompletionCandidates::None => {}
    CompletionCandidates::Path => line.push_str(" -F"),
    CompletionCandidates::Hostname => line.push_str(" -fa \"(__fish_print_hostnames)\""),
    CompletionCandidates::Username => line.push_str(" -fa \"(__fish_complete_users)\""),
    CompletionCandidates::Fixed(values) => {
      let joined = values
        .iter()
        .map(|value| escape_double_quoted(value))
        .collect::<Vec<_>>()
        .join(" ");
      line.push_str(&format!(" -fa \"{joined}\""));
    }
    CompletionCandidates::Custom(custom) => {
      line.push_str(" -fa ");
      line.push_str(&custom.generate(ShellType::Fish));
    }
  }
}

/// Append ` -d '<help>'` using only the first line of `help`.
fn push_help(line: &mut String, help: &str) {
  let first_line = help.split(['\r', '\n']).next().unwrap_or_default();
  if first_line.trim().is_empty() {
    return;
  }

  line.push_str(&format!(" -d '{}'", escape_single_quoted(first_line)));
}

/// Name of the variable listing the subcommands of the command at `chain`.
///
/// Each path segment has every character other than ASCII letters, digits
/// and `_` replaced with `_`, so parent and child compute the same identifier
/// independently.
pub fn subcommands_var_name(chain: &[&str]) -> String {
  let mut name = chain
    .iter()
    .map(|segment| {
      segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect::<String>()
    })
    .collect::<Vec<_>>()
    .join("_");
  name.push_str(SUBCOMMANDS_VAR_SUFFIX);
  name
}
