//! `fishgen inspect`: validate a definition and list its command paths.

use std::path::Path;

use anyhow::Result;

use crate::color::ColorScheme;
use crate::definition::load_definition;
use crate::model::CommandNode;

/// Print every command path in `definition`, one per line.
///
/// # Errors
/// Returns an error if the definition cannot be loaded or fails validation.
pub(crate) fn handle_inspect_command(definition: &Path, colors: &ColorScheme) -> Result<()> {
  let command = load_definition(definition)?;

  for line in describe_tree(&command) {
    println!("{line}");
  }

  eprintln!(
    "{} {} commands in {}",
    colors.success("✓"),
    colors.number(command.count_nodes()),
    colors.path(definition.display())
  );

  Ok(())
}

/// One line per command: its path followed by option and argument counts.
fn describe_tree(command: &CommandNode) -> Vec<String> {
  command
    .walk()
    .into_iter()
    .map(|(path, node)| {
      let visible = node.options.iter().filter(|option| option.is_completable()).count();
      format!("{path} ({visible} options, {} arguments)", node.arguments.len())
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{CommandOption, PositionalArg};

  #[test]
  fn test_describe_tree() {
    let tree = CommandNode::new("tool")
      .option(CommandOption::new(["--verbose"]))
      .option(CommandOption::new(["--secret"]).hidden(true))
      .subcommand(CommandNode::new("run").argument(PositionalArg::new()));

    insta::assert_snapshot!(describe_tree(&tree).join("\n"), @r###"
    tool (1 options, 0 arguments)
    tool run (0 options, 1 arguments)
    "###);
  }
}
