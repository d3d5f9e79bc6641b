use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell as CompletionShell, generate};

use crate::clap_tree::command_tree_from_clap;
use crate::cli::{Cli, Shell};
use crate::fish::generate_fish_completion;

/// Handle completions command
///
/// fish output comes from our own generator; other shells are delegated to
/// `clap_complete`.
pub(crate) fn handle_completions_command(shell: Shell) -> Result<()> {
  let mut cmd = Cli::command();
  let bin_name = cmd.get_name().to_string();

  let clap_shell = match shell {
    Shell::Fish => {
      let script = generate_fish_completion(&command_tree_from_clap(&cmd));
      let mut stdout = io::stdout().lock();
      return stdout
        .write_all(script.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write completions to stdout");
    }
    Shell::Bash => CompletionShell::Bash,
    Shell::Zsh => CompletionShell::Zsh,
    Shell::Powershell => CompletionShell::PowerShell,
    Shell::Elvish => CompletionShell::Elvish,
  };

  generate(clap_shell, &mut cmd, bin_name, &mut io::stdout());
  Ok(())
}
