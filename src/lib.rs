//! Fish shell completion script generator
//!
//! This library renders `complete` scripts for the fish shell from a tree of
//! commands, options, and positional arguments. Trees can be built directly
//! with [`model::CommandNode`], loaded from JSON with [`definition`], or
//! derived from a `clap::Command` with [`clap_tree`].

pub mod clap_tree;
pub mod cli;
pub mod color;
pub mod commands;
pub mod definition;
pub mod fish;
pub mod model;
pub mod quoting;
