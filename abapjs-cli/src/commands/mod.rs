//! Command implementations

pub mod check;
pub mod compile;
pub mod config;

pub use check::check_command;
pub use compile::compile_command;
pub use config::config_command;
