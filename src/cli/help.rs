//! Command-name contract used in log events.

use crate::cli::parse::Commands;

/// Stable command name, e.g. "run" or "requirements".
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Run { .. } => "run",
        Commands::List { .. } => "list",
        Commands::Requirements { .. } => "requirements",
    }
}
