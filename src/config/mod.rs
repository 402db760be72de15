// src/config/mod.rs

//! Configuration loading and validation for the `pollwait` binary.
//!
//! - `model.rs`: the TOML-backed data model.
//! - `loader.rs`: read a config file from disk.
//! - `validate.rs`: turn the raw model into validated [`PollSettings`].
//! - `duration.rs`: `"250ms"` / `"3s"` style duration strings.

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_duration;
pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CommandSection, ConfigFile, PollSettings, RawConfigFile, RawPollSection};
pub use validate::validate_settings;
