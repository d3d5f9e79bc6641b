//! Sample command definitions shared by the integration tests.

/// A git-like tool with a nested `remote` group.
pub fn vcs_definition() -> &'static str {
  r#"{
    "name": "vcs",
    "help": "A tiny version control system",
    "options": [
      { "names": ["--verbose", "-v"], "help": "Print more output" },
      { "names": ["--config", "-c"], "arity": 1, "completion": "path", "help": "Config file\nDefaults to ~/.vcsrc" },
      { "names": ["--debug-internals"], "hidden": true }
    ],
    "subcommands": [
      {
        "name": "clone",
        "help": "Clone a repository",
        "options": [
          { "names": ["--depth"], "arity": 1, "help": "Limit history depth" },
          { "names": ["--user", "-u"], "arity": 1, "completion": "username" }
        ],
        "arguments": [
          { "help": "Host to clone from", "completion": "hostname" },
          { "help": "Where to put it", "completion": "path" }
        ]
      },
      {
        "name": "remote",
        "help": "Manage remotes",
        "subcommands": [
          {
            "name": "add",
            "help": "Add a remote",
            "options": [{ "names": ["--mirror"], "arity": 1, "completion": { "fixed": ["fetch", "push"] } }]
          },
          {
            "name": "remove",
            "help": "Remove a remote",
            "arguments": [{ "completion": { "command": "vcs remote list" } }]
          }
        ]
      }
    ]
  }"#
}

/// A command with nothing to complete.
pub fn empty_definition() -> &'static str {
  r#"{ "name": "noop", "help": "Does nothing", "options": [{ "names": ["--hidden"], "hidden": true }] }"#
}
