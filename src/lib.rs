//! Smartlists - smart playlist rule compiler
//!
//! This library crate exposes configuration loading and the on-disk playlist
//! library used by the CLI, for integration testing.

pub mod config;
pub mod library;
