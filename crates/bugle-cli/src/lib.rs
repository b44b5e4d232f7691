//! Bugle CLI
//!
//! Command implementations behind the `bugle` binary.

pub mod commands;
