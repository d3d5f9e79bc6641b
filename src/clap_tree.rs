//! Build command trees from `clap` command definitions.

use clap::builder::ValueHint;
use clap::{Arg, Command};
use tracing::trace;

use crate::model::{CommandNode, CommandOption, CompletionCandidates, PositionalArg};

/// Convert a `clap` command into a [`CommandNode`] tree.
///
/// The command is cloned and built first so auto-generated arguments such as
/// `--help`/`--version` and default value counts are present. Hidden
/// subcommands and hidden positionals are left out; hidden flags are kept as
/// hidden options so the generator can skip them.
pub fn command_tree_from_clap(command: &Command) -> CommandNode {
  let mut command = command.clone();
  command.build();
  convert_command(&command)
}

fn convert_command(command: &Command) -> CommandNode {
  let mut node = CommandNode::new(command.get_name());
  node.help = command.get_about().map(ToString::to_string).unwrap_or_default();

  for arg in command.get_arguments() {
    if arg.is_positional() {
      if arg.is_hide_set() {
        trace!("Skipping hidden positional {} of {}", arg.get_id(), command.get_name());
        continue;
      }
      node.arguments.push(
        PositionalArg::new()
          .help(arg_help(arg))
          .completion(arg_completion(arg)),
      );
    } else {
      node.options.push(convert_option(arg));
    }
  }

  for subcommand in command.get_subcommands() {
    if subcommand.is_hide_set() {
      trace!("Skipping hidden subcommand {}", subcommand.get_name());
      continue;
    }
    node.subcommands.push(convert_command(subcommand));
  }

  node
}

fn convert_option(arg: &Arg) -> CommandOption {
  let mut names = Vec::new();

  if let Some(long) = arg.get_long() {
    names.push(format!("--{long}"));
  }
  if let Some(short) = arg.get_short() {
    names.push(format!("-{short}"));
  }
  if let Some(aliases) = arg.get_all_aliases() {
    names.extend(aliases.into_iter().map(|alias| format!("--{alias}")));
  }
  if let Some(aliases) = arg.get_all_short_aliases() {
    names.extend(aliases.into_iter().map(|alias| format!("-{alias}")));
  }

  let arity = if arg.get_action().takes_values() {
    arg.get_num_args().map(|range| range.min_values()).unwrap_or(1)
  } else {
    0
  };

  CommandOption::new(names)
    .hidden(arg.is_hide_set())
    .arity(arity)
    .help(arg_help(arg))
    .completion(arg_completion(arg))
}

fn arg_help(arg: &Arg) -> String {
  arg.get_help().map(ToString::to_string).unwrap_or_default()
}

/// Pick value suggestions for `arg`: explicit possible values win over the
/// value hint.
fn arg_completion(arg: &Arg) -> CompletionCandidates {
  if !arg.get_action().takes_values() {
    return CompletionCandidates::None;
  }

  let values: Vec<String> = arg
    .get_possible_values()
    .iter()
    .filter(|value| !value.is_hide_set())
    .map(|value| value.get_name().to_string())
    .collect();
  if !values.is_empty() {
    return CompletionCandidates::Fixed(values);
  }

  match arg.get_value_hint() {
    ValueHint::AnyPath | ValueHint::FilePath | ValueHint::DirPath | ValueHint::ExecutablePath => {
      CompletionCandidates::Path
    }
    ValueHint::Hostname => CompletionCandidates::Hostname,
    ValueHint::Username => CompletionCandidates::Username,
    _ => CompletionCandidates::None,
  }
}
