//! Command handlers, one module per subcommand.

pub mod check;
pub mod completion;
pub mod explain;
pub mod probe;
pub mod version;
