//! Command line interface for the `semret` binary.

pub mod args;
pub mod commands;
pub mod output;
