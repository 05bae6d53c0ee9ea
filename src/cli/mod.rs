pub mod commands;
pub mod core;
mod help;
pub mod io;
pub mod output;
pub mod prefill;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod terminal;
pub mod test_mode;

pub use shell::run_cli;
