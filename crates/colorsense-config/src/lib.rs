//! Configuration management for the colorsense detector.
//!
//! This crate loads the detector's [`Config`](config::Config) from layered
//! sources: built-in defaults, an optional TOML or YAML file, and
//! `COLORSENSE_`-prefixed environment variables.

pub mod config;

pub use config::{Config, ConfigError, Stream, load_config};
