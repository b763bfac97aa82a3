// src/config/mod.rs

//! Run configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the validated [`RunConfig`]
//!   (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Validate settings and apply defaults (`validate.rs`).
//!
//! Command-line flags are folded in as a [`RawRunSection`] of overrides, so
//! file values and flags go through the same validation.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigFile, RawConfigFile, RawRunSection, RunConfig};
