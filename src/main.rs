//! fishgen - Generate fish shell completion scripts
//!
//! This is the main entry point for the CLI application.

fn main() {
  fishgen::cli::run();
}
