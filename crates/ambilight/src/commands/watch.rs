//! Live panel: full session startup, then follow diagnostics.

use ambilight_core::Session;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::console::ConsoleView;
use crate::error::CliError;
use crate::output;

use super::settings;

pub async fn handle(session: &Session<ConsoleView>, global: &GlobalOpts) -> Result<(), CliError> {
    session.startup().await?;

    {
        let mut view = session.view().await;
        let form = view.form();
        let preview = form
            .preview_source()
            .map_or_else(|| "-".into(), ToString::to_string);
        let panel = format!(
            "Preview:  {preview}\n{}\n{}",
            settings::render_fields(form, global),
            view.format_snapshot(form.diagnostics())
        );
        output::print_output(&panel, global.quiet);
        if !global.quiet {
            view.follow();
        }
    }

    debug!("following diagnostics until interrupted");
    let interrupted = tokio::signal::ctrl_c().await;
    session.shutdown().await;
    interrupted?;
    Ok(())
}
