//! Version reporting.
//!
//! Implements the `fishgen version` subcommand, which prints either a
//! human-readable summary or a JSON document.

use anyhow::Result;
use serde_json::json;

use crate::color::ColorScheme;

/// Render version metadata in JSON or human-readable form.
///
/// # Arguments
/// * `json` - When `true`, emit a JSON document instead of colored text.
/// * `short` - When `true`, print only the semantic version string.
/// * `colors` - Shared color palette for styled terminal output.
pub(crate) fn handle_version_command(json: bool, short: bool, colors: &ColorScheme) -> Result<()> {
  let version = env!("CARGO_PKG_VERSION");

  if short {
    println!("{version}");
  } else if json {
    println!("{}", serde_json::to_string_pretty(&version_document())?);
  } else {
    println!("{} {}", colors.emphasis(env!("CARGO_PKG_NAME")), colors.number(version));
    println!("{}: {}", colors.emphasis("Repository"), colors.link(env!("CARGO_PKG_REPOSITORY")));
  }

  Ok(())
}

fn version_document() -> serde_json::Value {
  json!({
    "name": env!("CARGO_PKG_NAME"),
    "version": env!("CARGO_PKG_VERSION"),
    "repository": env!("CARGO_PKG_REPOSITORY"),
  })
}
