//! The four independent detection probes.
//!
//! Each probe is a free function over explicit inputs and returns a
//! [`Support`](crate::Support). The [`Detector`](crate::Detector) wires them
//! to its environment snapshot and collaborators.

pub mod curses;
pub mod env;
pub mod term;
pub mod tput;
