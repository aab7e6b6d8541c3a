//! Display listing.

use tabled::Tabled;

use ambilight_core::{CoreError, Display, Session};

use crate::cli::GlobalOpts;
use crate::console::ConsoleView;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
}

impl From<&Display> for DisplayRow {
    fn from(d: &Display) -> Self {
        let resolution = match (d.width, d.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            _ => "-".into(),
        };
        Self {
            id: d.id,
            name: d.name.clone(),
            resolution,
        }
    }
}

pub async fn handle(session: &Session<ConsoleView>, global: &GlobalOpts) -> Result<(), CliError> {
    let displays = session
        .client()
        .get_displays()
        .await
        .map_err(CoreError::from)?;

    let out = output::render_list(
        &global.output,
        &displays,
        |d| DisplayRow::from(d),
        |d| d.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
