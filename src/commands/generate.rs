//! `fishgen generate`: render a definition into a fish completion script.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::color::ColorScheme;
use crate::definition::load_definition;
use crate::fish::generate_fish_completion;

/// Load `definition`, generate its fish script, and write it out.
///
/// # Arguments
/// * `definition` - Path to the JSON command definition.
/// * `output` - Destination file; `None` writes to stdout.
/// * `force` - Replace `output` if it already exists.
/// * `colors` - Shared color palette for status messages on stderr.
///
/// # Errors
/// Returns an error if the definition is invalid or the script cannot be
/// written.
pub(crate) fn handle_generate_command(
  definition: &Path,
  output: Option<&Path>,
  force: bool,
  colors: &ColorScheme,
) -> Result<()> {
  let command = load_definition(definition)?;
  let script = generate_fish_completion(&command);

  if script.is_empty() {
    warn!("{} has no options, arguments or subcommands to complete", command.name);
    eprintln!(
      "{} {} has nothing to complete; the script is empty",
      colors.warning("Warning:"),
      colors.emphasis(&command.name)
    );
  }

  write_script(&script, output, force)?;

  if let Some(path) = output {
    info!("Wrote {} bytes to {}", script.len(), path.display());
    eprintln!(
      "{} Wrote completions for {} to {}",
      colors.success("✓"),
      colors.emphasis(&command.name),
      colors.path(path.display())
    );
  }

  Ok(())
}

/// Write `script` to `output`, or to stdout when no path is given.
///
/// # Errors
/// Returns an error if `output` exists and `force` is not set, or on any I/O
/// failure.
pub fn write_script(script: &str, output: Option<&Path>, force: bool) -> Result<()> {
  match output {
    Some(path) => {
      if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
      }
      fs::write(path, script).with_context(|| format!("Failed to write {}", path.display()))
    }
    None => {
      let mut stdout = io::stdout().lock();
      stdout
        .write_all(script.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write script to stdout")
    }
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_write_script_creates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tool.fish");

    write_script("complete -c tool -l foo\n", Some(&path), false).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "complete -c tool -l foo\n");
  }

  #[test]
  fn test_write_script_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tool.fish");
    fs::write(&path, "old").unwrap();

    let err = write_script("new", Some(&path), false).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "old");
  }

  #[test]
  fn test_write_script_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tool.fish");
    fs::write(&path, "old").unwrap();

    write_script("new", Some(&path), true).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
  }
}
