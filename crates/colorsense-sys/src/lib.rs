//! Platform and subprocess collaborators for the colorsense detector.
//!
//! The detector itself never touches the terminal or spawns processes
//! directly. It talks to the traits defined here, so tests and alternate
//! hosts can substitute their own implementations.

pub mod commands;
pub mod platform;

pub use commands::{CommandError, CommandRunner, SystemRunner};
pub use platform::{HostPlatform, Platform};
