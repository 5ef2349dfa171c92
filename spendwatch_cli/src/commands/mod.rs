//! CLI subcommand implementations.

pub mod campaigns;
pub mod daily;
