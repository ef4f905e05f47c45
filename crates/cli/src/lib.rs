//! Whittle CLI library: subcommand definitions and execution.

pub mod commands;
