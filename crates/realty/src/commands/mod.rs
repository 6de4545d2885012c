//! Command dispatch: bridges CLI args -> console stores -> output formatting.

pub mod config_cmd;
pub mod properties;
pub mod stats;
pub mod team;
pub mod users;
pub mod util;

use realty_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Users(args) => users::handle(console, args, global).await,
        Command::Properties(args) => properties::handle(console, args, global).await,
        Command::Team(args) => team::handle(console, args, global).await,
        Command::Stats(args) => stats::handle(console, args, global).await,
        // Config and Completions run in main before a console exists.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
