//! Preset command handlers.

use tabled::Tabled;

use ambilight_core::{Action, CoreError, FieldId, FieldStore, Preset, Session};

use crate::cli::{GlobalOpts, PresetsArgs, PresetsCommand};
use crate::console::ConsoleView;
use crate::error::CliError;
use crate::output;

use super::{settings, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Display")]
    display: u32,
    #[tabled(rename = "Interval")]
    interval: String,
    #[tabled(rename = "Dark")]
    dark: String,
    #[tabled(rename = "Boost")]
    boost: String,
    #[tabled(rename = "Zone")]
    zone: String,
}

impl From<&Preset> for PresetRow {
    fn from(p: &Preset) -> Self {
        let c = &p.config;
        Self {
            name: p.name.clone(),
            display: c.display_id,
            interval: format!("{}s", c.preview_interval_sec),
            dark: c.dark_threshold.to_string(),
            boost: c.saturation_boost.to_string(),
            zone: format!(
                "{}x{}+{}+{}",
                c.zone.width, c.zone.height, c.zone.x, c.zone.y
            ),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<ConsoleView>,
    args: PresetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PresetsCommand::List => {
            let presets = session
                .client()
                .list_presets()
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(
                &global.output,
                &presets,
                |p| PresetRow::from(p),
                |p| p.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PresetsCommand::Save { name } => {
            let name = util::preset_name(&name)?;
            run(session, Action::SavePreset, name).await?;
            if !global.quiet {
                eprintln!("✓ Preset '{name}' saved");
            }
            Ok(())
        }

        PresetsCommand::Load { name } => {
            let name = util::preset_name(&name)?;
            session.load_displays().await?;
            run(session, Action::LoadPreset, name)
                .await
                .map_err(|e| util::not_found_as(e, "preset", name, "presets list"))?;
            if !global.quiet {
                eprintln!("✓ Preset '{name}' loaded");
            }
            let out = settings::render_fields(session.view().await.form(), global);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PresetsCommand::Delete { name } => {
            let name = util::preset_name(&name)?;
            if !util::confirm(
                "presets delete",
                &format!("Delete preset '{name}'?"),
                global.yes,
            )? {
                return Ok(());
            }
            run(session, Action::DeletePreset, name)
                .await
                .map_err(|e| util::not_found_as(e, "preset", name, "presets list"))?;
            if !global.quiet {
                eprintln!("✓ Preset '{name}' deleted");
            }
            Ok(())
        }
    }
}

/// Put `name` in the preset input and run the preset action.
async fn run(session: &Session<ConsoleView>, action: Action, name: &str) -> Result<(), CoreError> {
    session.view().await.write(FieldId::PresetName, name);
    session.handle(action).await
}
