//! Live configuration: show and edit through the form.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use ambilight_core::{Action, FieldId, FieldStore, FormState, Session};

use crate::cli::{GlobalOpts, SettingsArgs, SettingsCommand, SettingsSetArgs};
use crate::console::ConsoleView;
use crate::error::CliError;
use crate::output;

// ── Field listing ───────────────────────────────────────────────────

/// One configuration input and its current text.
#[derive(Serialize)]
pub struct FieldEntry {
    field: &'static str,
    value: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn entries(form: &FormState) -> Vec<FieldEntry> {
    FieldId::iter()
        .filter(|f| *f != FieldId::PresetName)
        .map(|f| FieldEntry {
            field: f.into(),
            value: form.read(f),
        })
        .collect()
}

/// Render the configuration fields of `form` in the selected format.
pub fn render_fields(form: &FormState, global: &GlobalOpts) -> String {
    let label = form
        .selected_display()
        .map(|opt| opt.label.clone())
        .unwrap_or_default();
    output::render_list(
        &global.output,
        &entries(form),
        |e| FieldRow {
            field: e.field,
            value: if e.field == <&str>::from(FieldId::DisplaySelect) && !label.is_empty() {
                format!("{} ({label})", e.value)
            } else {
                e.value.clone()
            },
        },
        |e| format!("{}={}", e.field, e.value),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session<ConsoleView>,
    args: SettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session.load_displays().await?;
    session.load_config().await?;

    match args.command {
        SettingsCommand::Show => {}
        SettingsCommand::Set(set) => {
            apply_edits(session, &set).await?;
            session.handle(Action::SaveConfig).await?;
            if !global.quiet {
                eprintln!("✓ Configuration saved");
            }
            // Show what the backend now holds.
            session.load_config().await?;
        }
    }

    let out = render_fields(session.view().await.form(), global);
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Overwrite the given inputs. Unset flags keep their hydrated values.
async fn apply_edits(session: &Session<ConsoleView>, set: &SettingsSetArgs) -> Result<(), CliError> {
    let edits = [
        (FieldId::DisplaySelect, set.display.map(|v| v.to_string())),
        (FieldId::PreviewInterval, set.preview_interval.map(|v| v.to_string())),
        (FieldId::DarkThreshold, set.dark_threshold.map(|v| v.to_string())),
        (FieldId::SaturationBoost, set.saturation_boost.map(|v| v.to_string())),
        (FieldId::ZoneX, set.zone_x.map(|v| v.to_string())),
        (FieldId::ZoneY, set.zone_y.map(|v| v.to_string())),
        (FieldId::ZoneWidth, set.zone_width.map(|v| v.to_string())),
        (FieldId::ZoneHeight, set.zone_height.map(|v| v.to_string())),
    ];

    if edits.iter().all(|(_, value)| value.is_none()) {
        return Err(CliError::Validation {
            field: "settings".into(),
            reason: "nothing to set; pass at least one field flag".into(),
        });
    }

    let mut view = session.view().await;
    if let Some(display) = set.display.map(|id| id.to_string()) {
        let known = view
            .form()
            .display_options()
            .iter()
            .any(|opt| opt.value == display);
        if !known {
            return Err(CliError::NotFound {
                resource_type: "display".into(),
                identifier: display,
                list_command: "displays".into(),
            });
        }
    }
    for (field, value) in edits {
        if let Some(value) = value {
            view.write(field, &value);
        }
    }
    Ok(())
}
