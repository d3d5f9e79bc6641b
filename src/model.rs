//! Command tree model consumed by the completion generators.
//!
//! A [`CommandNode`] owns its options, positional arguments, and subcommands,
//! so a tree is acyclic by construction. Nodes are built up front (by hand,
//! from a JSON definition, or from a `clap::Command`) and are only read while
//! a script is generated.

use std::fmt;
use std::sync::Arc;

use crate::quoting::escape_double_quoted;

/// Shell dialect passed to custom completion callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellType {
  Bash,
  Fish,
}

/// Callback producing a shell expression that yields completion candidates.
#[derive(Clone)]
pub struct CustomCompletion(Arc<dyn Fn(ShellType) -> String + Send + Sync>);

impl CustomCompletion {
  /// Wrap a callback.
  pub fn new<F>(generator: F) -> Self
  where
    F: Fn(ShellType) -> String + Send + Sync + 'static,
  {
    Self(Arc::new(generator))
  }

  /// Invoke the callback for `shell`.
  pub fn generate(&self, shell: ShellType) -> String {
    (self.0)(shell)
  }
}

impl fmt::Debug for CustomCompletion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("CustomCompletion(..)")
  }
}

/// Strategy for suggesting values of an option or positional argument.
#[derive(Debug, Clone, Default)]
pub enum CompletionCandidates {
  /// No value suggestions.
  #[default]
  None,
  /// Filesystem paths.
  Path,
  /// Known hostnames.
  Hostname,
  /// Known usernames.
  Username,
  /// Exactly these literal values, in order.
  Fixed(Vec<String>),
  /// A shell expression produced by a callback; embedded verbatim.
  Custom(CustomCompletion),
}

impl CompletionCandidates {
  /// Build a [`CompletionCandidates::Custom`] from a callback.
  pub fn custom<F>(generator: F) -> Self
  where
    F: Fn(ShellType) -> String + Send + Sync + 'static,
  {
    Self::Custom(CustomCompletion::new(generator))
  }

  /// Suggest each whitespace-separated word printed by `command`.
  ///
  /// The command runs inside a command substitution of the target shell, so
  /// it must be valid in every dialect it is rendered for. For fish it is
  /// escaped for the surrounding double quotes and unescaped again by fish
  /// when the `complete` line is read.
  pub fn from_stdout(command: impl Into<String>) -> Self {
    let command = command.into();
    Self::custom(move |shell| match shell {
      ShellType::Fish => format!("\"({})\"", escape_double_quoted(&command)),
      ShellType::Bash => format!("\"$({command})\""),
    })
  }
}

/// Whether `name` can be completed as a flag.
///
/// It must start with `-` and contain something other than dashes, so bare
/// words as well as `-` and `--` are rejected.
pub fn is_completion_flag(name: &str) -> bool {
  name.starts_with('-') && !name.trim_start_matches('-').is_empty()
}

/// A named flag accepted by a command.
#[derive(Debug, Clone, Default)]
pub struct CommandOption {
  /// Flag tokens such as `--output`, `-o`, or `-output`.
  pub names: Vec<String>,
  /// Hidden options never appear in completions.
  pub hidden: bool,
  /// Minimum number of values consumed per occurrence.
  pub arity: usize,
  /// Help text; may span several lines.
  pub help: String,
  pub completion: CompletionCandidates,
}

impl CommandOption {
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      names: names.into_iter().map(Into::into).collect(),
      ..Self::default()
    }
  }

  pub fn hidden(mut self, hidden: bool) -> Self {
    self.hidden = hidden;
    self
  }

  pub fn arity(mut self, arity: usize) -> Self {
    self.arity = arity;
    self
  }

  pub fn help(mut self, help: impl Into<String>) -> Self {
    self.help = help.into();
    self
  }

  pub fn completion(mut self, completion: CompletionCandidates) -> Self {
    self.completion = completion;
    self
  }

  /// Names usable as fish completion flags, in declaration order.
  ///
  /// Only tokens accepted by [`is_completion_flag`] qualify.
  pub fn completion_names(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str).filter(|name| is_completion_flag(name))
  }

  /// Whether this option should produce a completion rule at all.
  pub fn is_completable(&self) -> bool {
    !self.hidden && self.completion_names().next().is_some()
  }
}

/// An unnamed positional argument.
#[derive(Debug, Clone, Default)]
pub struct PositionalArg {
  pub help: String,
  pub completion: CompletionCandidates,
}

impl PositionalArg {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn help(mut self, help: impl Into<String>) -> Self {
    self.help = help.into();
    self
  }

  pub fn completion(mut self, completion: CompletionCandidates) -> Self {
    self.completion = completion;
    self
  }
}

/// A command and everything nested under it.
#[derive(Debug, Clone, Default)]
pub struct CommandNode {
  /// Token identifying the command among its siblings.
  pub name: String,
  /// Help text; may be empty or span several lines.
  pub help: String,
  pub options: Vec<CommandOption>,
  pub arguments: Vec<PositionalArg>,
  pub subcommands: Vec<CommandNode>,
}

impl CommandNode {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  pub fn help(mut self, help: impl Into<String>) -> Self {
    self.help = help.into();
    self
  }

  pub fn option(mut self, option: CommandOption) -> Self {
    self.options.push(option);
    self
  }

  pub fn argument(mut self, argument: PositionalArg) -> Self {
    self.arguments.push(argument);
    self
  }

  pub fn subcommand(mut self, subcommand: CommandNode) -> Self {
    self.subcommands.push(subcommand);
    self
  }

  /// Number of nodes in this subtree, including `self`.
  pub fn count_nodes(&self) -> usize {
    1 + self.subcommands.iter().map(CommandNode::count_nodes).sum::<usize>()
  }

  /// This subtree in pre-order, each node paired with its space-separated
  /// command path (e.g. `git remote add`).
  pub fn walk(&self) -> Vec<(String, &CommandNode)> {
    let mut nodes = Vec::new();
    collect_nodes(self, "", &mut nodes);
    nodes
  }

  /// Space-separated command paths of this subtree in pre-order.
  ///
  /// # Returns
  /// One entry per node, e.g. `["git", "git remote", "git remote add"]`.
  pub fn path_names(&self) -> Vec<String> {
    self.walk().into_iter().map(|(path, _)| path).collect()
  }
}

fn collect_nodes<'a>(node: &'a CommandNode, prefix: &str, nodes: &mut Vec<(String, &'a CommandNode)>) {
  let path = if prefix.is_empty() {
    node.name.clone()
  } else {
    format!("{prefix} {}", node.name)
  };

  nodes.push((path.clone(), node));

  for subcommand in &node.subcommands {
    collect_nodes(subcommand, &path, nodes);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_tree() -> CommandNode {
    CommandNode::new("git")
      .subcommand(
        CommandNode::new("remote")
          .subcommand(CommandNode::new("add"))
          .subcommand(CommandNode::new("remove")),
      )
      .subcommand(CommandNode::new("status"))
  }

  #[test]
  fn test_completion_names_filters_bare_words() {
    let option = CommandOption::new(["--verbose", "verbose", "-v"]);
    let names: Vec<&str> = option.completion_names().collect();
    assert_eq!(names, vec!["--verbose", "-v"]);
  }

  #[test]
  fn test_dash_only_names_are_not_flags() {
    assert!(is_completion_flag("-v"));
    assert!(is_completion_flag("--verbose"));
    assert!(is_completion_flag("-old"));
    assert!(!is_completion_flag("-"));
    assert!(!is_completion_flag("--"));
    assert!(!is_completion_flag("verbose"));

    let option = CommandOption::new(["-", "--", "--real"]);
    let names: Vec<&str> = option.completion_names().collect();
    assert_eq!(names, vec!["--real"]);
    assert!(!CommandOption::new(["--"]).is_completable());
  }

  #[test]
  fn test_hidden_option_is_not_completable() {
    assert!(CommandOption::new(["--debug"]).is_completable());
    assert!(!CommandOption::new(["--debug"]).hidden(true).is_completable());
    assert!(!CommandOption::new(["debug"]).is_completable());
  }

  #[test]
  fn test_from_stdout_renders_per_shell() {
    let CompletionCandidates::Custom(custom) = CompletionCandidates::from_stdout("ls /tmp") else {
      panic!("expected custom completion");
    };
    assert_eq!(custom.generate(ShellType::Fish), "\"(ls /tmp)\"");
    assert_eq!(custom.generate(ShellType::Bash), "\"$(ls /tmp)\"");
  }

  #[test]
  fn test_from_stdout_escapes_fish_double_quotes() {
    let CompletionCandidates::Custom(custom) =
      CompletionCandidates::from_stdout(r#"git branch --format="%(refname:short)""#)
    else {
      panic!("expected custom completion");
    };
    assert_eq!(
      custom.generate(ShellType::Fish),
      r#""(git branch --format=\"%(refname:short)\")""#
    );
  }

  #[test]
  fn test_count_nodes() {
    assert_eq!(sample_tree().count_nodes(), 5);
    assert_eq!(CommandNode::new("solo").count_nodes(), 1);
  }

  #[test]
  fn test_walk_pairs_paths_with_nodes() {
    let tree = sample_tree();
    let walked: Vec<(String, usize)> = tree
      .walk()
      .into_iter()
      .map(|(path, node)| (path, node.subcommands.len()))
      .collect();
    assert_eq!(walked[0], ("git".to_string(), 2));
    assert_eq!(walked[1], ("git remote".to_string(), 2));
    assert_eq!(walked[4], ("git status".to_string(), 0));
  }

  #[test]
  fn test_path_names_pre_order() {
    assert_eq!(
      sample_tree().path_names(),
      vec!["git", "git remote", "git remote add", "git remote remove", "git status"]
    );
  }

  #[test]
  fn test_tree_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CommandNode>();
  }
}
