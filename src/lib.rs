//! `autosales-dash` library crate.
//!
//! The binary (`autosales`) is a thin wrapper around this library so that:
//!
//! - aggregation and binding logic is testable without spawning processes
//! - the CLI and the TUI share one load/report pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod binding;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod tui;
