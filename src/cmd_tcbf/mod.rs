//! Subcommand modules for the `tcbf` binary.

pub mod boundary;
