//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod fmt;
mod tree;
mod validate;

pub use fmt::handle_fmt;
pub use tree::handle_tree;
pub use validate::handle_validate;
