//! CLI subcommand handlers.
//!
//! This module groups the implementations for each `fishgen` subcommand,
//! keeping `cli.rs` limited to argument definitions and dispatch.

pub mod completions;
pub mod generate;
pub mod inspect;
pub mod version;
