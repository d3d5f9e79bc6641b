//! End-to-end tests from JSON definitions to fish scripts.

mod common;

use std::fs;

use common::fixtures;
use fishgen::commands::generate::write_script;
use fishgen::definition::{load_definition, parse_definition};
use fishgen::fish::generate_fish_completion;
use tempfile::TempDir;

#[test]
fn test_vcs_definition_script() {
  let command = parse_definition(fixtures::vcs_definition()).unwrap();
  let script = generate_fish_completion(&command);

  insta::assert_snapshot!(script, @r###"
  # Command completion for vcs
  # Generated by fishgen


  ### Setup for vcs
  set -l vcs_subcommands 'clone remote'

  ## Options for vcs
  complete -c vcs -n "not __fish_seen_subcommand_from $vcs_subcommands" -l verbose -s v -d 'Print more output'
  complete -c vcs -n "not __fish_seen_subcommand_from $vcs_subcommands" -l config -s c -r -F -d 'Config file'


  ### Setup for clone
  complete -c vcs -f -n __fish_use_subcommand -a clone -d 'Clone a repository'

  ## Options for clone
  complete -c vcs -n "__fish_seen_subcommand_from clone" -l depth -r -d 'Limit history depth'
  complete -c vcs -n "__fish_seen_subcommand_from clone" -l user -s u -r -fa "(__fish_complete_users)"

  ## Arguments for clone
  complete -c vcs -n "__fish_seen_subcommand_from clone" -fa "(__fish_print_hostnames)" -d 'Host to clone from'
  complete -c vcs -n "__fish_seen_subcommand_from clone" -F -d 'Where to put it'


  ### Setup for remote
  set -l vcs_remote_subcommands 'add remove'
  complete -c vcs -f -n __fish_use_subcommand -a remote -d 'Manage remotes'


  ### Setup for add
  complete -c vcs -f -n "__fish_seen_subcommand_from remote; and not __fish_seen_subcommand_from $vcs_remote_subcommands" -a add -d 'Add a remote'

  ## Options for add
  complete -c vcs -n "__fish_seen_subcommand_from add" -l mirror -r -fa "fetch push"


  ### Setup for remove
  complete -c vcs -f -n "__fish_seen_subcommand_from remote; and not __fish_seen_subcommand_from $vcs_remote_subcommands" -a remove -d 'Remove a remote'

  ## Arguments for remove
  complete -c vcs -n "__fish_seen_subcommand_from remove" -fa "(vcs remote list)"
  "###);
}

#[test]
fn test_hidden_option_never_rendered() {
  let command = parse_definition(fixtures::vcs_definition()).unwrap();
  let script = generate_fish_completion(&command);
  assert!(!script.contains("debug-internals"));
}

#[test]
fn test_definition_without_completions_is_empty() {
  let command = parse_definition(fixtures::empty_definition()).unwrap();
  assert_eq!(generate_fish_completion(&command), "");
}

#[test]
fn test_generation_is_stable_across_loads() {
  let first = generate_fish_completion(&parse_definition(fixtures::vcs_definition()).unwrap());
  let second = generate_fish_completion(&parse_definition(fixtures::vcs_definition()).unwrap());
  assert_eq!(first, second);
}

#[test]
fn test_load_and_write_through_files() {
  let dir = TempDir::new().unwrap();
  let definition_path = dir.path().join("vcs.json");
  let output_path = dir.path().join("vcs.fish");
  fs::write(&definition_path, fixtures::vcs_definition()).unwrap();

  let command = load_definition(&definition_path).unwrap();
  let script = generate_fish_completion(&command);
  write_script(&script, Some(&output_path), false).unwrap();

  let written = fs::read_to_string(&output_path).unwrap();
  assert_eq!(written, script);
  assert!(written.ends_with("-fa \"(vcs remote list)\"\n"));
}

#[test]
fn test_load_invalid_definition_reports_path() {
  let dir = TempDir::new().unwrap();
  let definition_path = dir.path().join("broken.json");
  fs::write(&definition_path, r#"{ "name": "tool", "subcommands": [{ "name": "a" }, { "name": "a" }] }"#).unwrap();

  let err = load_definition(&definition_path).unwrap_err();
  let message = format!("{err:#}");
  assert!(message.contains("Invalid definition"));
  assert!(message.contains("broken.json"));
  assert!(message.contains("Duplicate subcommand 'a' under 'tool'"));
}
