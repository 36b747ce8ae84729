//! Chipvoice CLI library.
//!
//! This crate provides the command implementations behind the `chipvoice`
//! binary, plus config loading with `--set` overrides.

pub mod commands;
pub mod input;
