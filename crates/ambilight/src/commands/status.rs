//! Diagnostics snapshot.

use ambilight_core::{CoreError, Diagnostics, Session};

use crate::cli::GlobalOpts;
use crate::console::ConsoleView;
use crate::error::CliError;
use crate::output;

fn detail(d: &Diagnostics, color: bool) -> String {
    let body = serde_json::to_string_pretty(d.as_value()).unwrap_or_else(|_| d.as_value().to_string());
    format!(
        "Sync:     {}\n\n{body}",
        output::sync_status_label(d.sync_status(), color)
    )
}

pub async fn handle(session: &Session<ConsoleView>, global: &GlobalOpts) -> Result<(), CliError> {
    let diagnostics = session
        .client()
        .get_status()
        .await
        .map_err(CoreError::from)?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &diagnostics,
        |d| detail(d, color),
        |d| d.sync_status().map_or_else(|| "unknown".into(), |s| s.to_string()),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
