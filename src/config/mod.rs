// src/config/mod.rs

//! Configuration loading and validation for xrun.
//!
//! Responsibilities:
//! - Define the on-disk data model and the validated `CommandSpec` list (`model.rs`).
//! - Load / write a config file (`loader.rs`).
//! - Validate basic invariants like non-empty labels (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, write_starter_config, ConfigFormat};
pub use model::{CommandConfig, CommandSpec, ConfigFile, RawConfigFile};
