//! CLI subcommands.

pub mod docs;
pub mod identify;
pub mod info;
pub mod launchers;
