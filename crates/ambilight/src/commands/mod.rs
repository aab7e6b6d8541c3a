//! Command dispatch: bridges CLI args -> session actions -> output formatting.

pub mod config_cmd;
pub mod displays;
pub mod presets;
pub mod settings;
pub mod status;
pub mod sync;
pub mod util;
pub mod watch;

use ambilight_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::console::ConsoleView;
use crate::error::CliError;

/// Dispatch a bridge-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session<ConsoleView>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Watch => watch::handle(session, global).await,
        Command::Status => status::handle(session, global).await,
        Command::Displays => displays::handle(session, global).await,
        Command::Settings(args) => settings::handle(session, args, global).await,
        Command::Presets(args) => presets::handle(session, args, global).await,
        Command::Sync(args) => sync::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
