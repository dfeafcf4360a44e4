mod commands;

pub use commands::{BackendArg, Cli, Commands};
