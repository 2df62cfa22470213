//! fa-cli library
//!
//! Command wiring for the `financeai` binary, exported for tests.

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod output;
pub mod terminal_display;
pub mod wallet_commands;


pub use cli::Cli;
pub use context::AppContext;
pub use error::{CliError, Result as CliResult};
pub use terminal_display::TerminalDisplay;
