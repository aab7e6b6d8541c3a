//! Sync engine control.

use ambilight_core::{Action, Session};

use crate::cli::{GlobalOpts, SyncAction, SyncArgs};
use crate::console::ConsoleView;
use crate::error::CliError;

impl From<SyncAction> for Action {
    fn from(action: SyncAction) -> Self {
        match action {
            SyncAction::Start => Action::Start,
            SyncAction::Pause => Action::Pause,
            SyncAction::Resume => Action::Resume,
            SyncAction::Stop => Action::Stop,
        }
    }
}

pub async fn handle(
    session: &Session<ConsoleView>,
    args: SyncArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = Action::from(args.action);
    session.handle(action).await?;
    if !global.quiet {
        eprintln!("✓ Sync {action} sent");
    }
    Ok(())
}
