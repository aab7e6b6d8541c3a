// ── View binder ──
//
// Moves values between wire types and the field store. Hydrate writes,
// collect reads. Nothing here touches the network.

use ambilight_api::{ANALYSIS_HZ, Configuration, Diagnostics, Display, Zone};

use super::{DisplayOption, FieldId, FieldStore};
use crate::error::CoreError;

/// Rebuild the display selector from `displays`, in the given order.
pub fn hydrate_displays<V: FieldStore + ?Sized>(view: &mut V, displays: &[Display]) {
    let options = displays
        .iter()
        .map(|d| DisplayOption {
            value: d.id.to_string(),
            label: d.name.clone(),
        })
        .collect();
    view.replace_display_options(options);
}

/// Write every configuration field into its input.
///
/// `analysis_hz` has no input and is not written.
pub fn hydrate_config<V: FieldStore + ?Sized>(view: &mut V, config: &Configuration) {
    view.write(FieldId::DisplaySelect, &config.display_id.to_string());
    view.write(
        FieldId::PreviewInterval,
        &config.preview_interval_sec.to_string(),
    );
    view.write(FieldId::DarkThreshold, &config.dark_threshold.to_string());
    view.write(FieldId::SaturationBoost, &config.saturation_boost.to_string());
    view.write(FieldId::ZoneX, &config.zone.x.to_string());
    view.write(FieldId::ZoneY, &config.zone.y.to_string());
    view.write(FieldId::ZoneWidth, &config.zone.width.to_string());
    view.write(FieldId::ZoneHeight, &config.zone.height.to_string());
}

/// Assemble a complete configuration from the current inputs.
///
/// `analysis_hz` is always [`ANALYSIS_HZ`].
pub fn collect_config<V: FieldStore + ?Sized>(view: &V) -> Result<Configuration, CoreError> {
    Ok(Configuration {
        display_id: read_int(view, FieldId::DisplaySelect)?,
        preview_interval_sec: read_float(view, FieldId::PreviewInterval)?,
        dark_threshold: read_float(view, FieldId::DarkThreshold)?,
        saturation_boost: read_float(view, FieldId::SaturationBoost)?,
        analysis_hz: ANALYSIS_HZ,
        zone: Zone {
            x: read_int(view, FieldId::ZoneX)?,
            y: read_int(view, FieldId::ZoneY)?,
            width: read_int(view, FieldId::ZoneWidth)?,
            height: read_int(view, FieldId::ZoneHeight)?,
        },
    })
}

/// Trimmed preset name, or `None` when the input is blank.
pub fn preset_name<V: FieldStore + ?Sized>(view: &V) -> Option<String> {
    let raw = view.read(FieldId::PresetName);
    let name = raw.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

/// Overwrite the diagnostics panel with the raw snapshot, pretty-printed.
pub fn render_diagnostics<V: FieldStore + ?Sized>(view: &mut V, diagnostics: &Diagnostics) {
    let value = diagnostics.as_value();
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    view.show_diagnostics(&rendered);
}

// ── Parsing ──────────────────────────────────────────────────────────

fn read_int<V: FieldStore + ?Sized>(view: &V, field: FieldId) -> Result<u32, CoreError> {
    let raw = view.read(field);
    raw.trim().parse().map_err(|_| CoreError::InvalidField {
        field,
        value: raw,
        expected: "a non-negative integer",
    })
}

fn read_float<V: FieldStore + ?Sized>(view: &V, field: FieldId) -> Result<f64, CoreError> {
    let raw = view.read(field);
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::InvalidField {
            field,
            value: raw,
            expected: "a finite number",
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::view::FormState;

    fn living_room() -> Vec<Display> {
        vec![Display {
            id: 3,
            name: "Living Room".into(),
            width: None,
            height: None,
        }]
    }

    fn scenario_config() -> Configuration {
        Configuration {
            display_id: 3,
            preview_interval_sec: 0.5,
            dark_threshold: 0.1,
            saturation_boost: 1.2,
            analysis_hz: 25.0,
            zone: Zone {
                x: 0,
                y: 0,
                width: 100,
                height: 50,
            },
        }
    }

    fn hydrated(displays: &[Display], config: &Configuration) -> FormState {
        let mut form = FormState::new();
        hydrate_displays(&mut form, displays);
        hydrate_config(&mut form, config);
        form
    }

    #[test]
    fn hydrate_writes_literal_values() {
        let form = hydrated(&living_room(), &scenario_config());

        assert_eq!(form.selected_display().unwrap().label, "Living Room");
        assert_eq!(form.read(FieldId::DisplaySelect), "3");
        assert_eq!(form.read(FieldId::PreviewInterval), "0.5");
        assert_eq!(form.read(FieldId::DarkThreshold), "0.1");
        assert_eq!(form.read(FieldId::SaturationBoost), "1.2");
        assert_eq!(form.read(FieldId::ZoneX), "0");
        assert_eq!(form.read(FieldId::ZoneY), "0");
        assert_eq!(form.read(FieldId::ZoneWidth), "100");
        assert_eq!(form.read(FieldId::ZoneHeight), "50");
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        let mut config = scenario_config();
        config.preview_interval_sec = 1.0;
        let form = hydrated(&living_room(), &config);
        assert_eq!(form.read(FieldId::PreviewInterval), "1");
    }

    #[test]
    fn hydrate_then_collect_returns_the_same_config() {
        let config = scenario_config();
        let form = hydrated(&living_room(), &config);
        assert_eq!(collect_config(&form).unwrap(), config);
    }

    #[test]
    fn collect_always_submits_fixed_analysis_rate() {
        let mut config = scenario_config();
        config.analysis_hz = 60.0;
        let form = hydrated(&living_room(), &config);

        let collected = collect_config(&form).unwrap();

        assert_eq!(collected.analysis_hz, ANALYSIS_HZ);
        assert_eq!(
            Configuration {
                analysis_hz: 60.0,
                ..collected
            },
            config
        );
    }

    #[test]
    fn collect_parses_edited_fields() {
        let mut form = hydrated(&living_room(), &scenario_config());
        form.write(FieldId::DarkThreshold, " 0.35 ");
        form.write(FieldId::ZoneWidth, "640");

        let collected = collect_config(&form).unwrap();

        assert_eq!(collected.dark_threshold, 0.35);
        assert_eq!(collected.zone.width, 640);
    }

    #[test]
    fn collect_rejects_fractional_zone() {
        let mut form = hydrated(&living_room(), &scenario_config());
        form.write(FieldId::ZoneX, "1.5");

        let err = collect_config(&form).unwrap_err();

        assert!(
            matches!(
                err,
                CoreError::InvalidField {
                    field: FieldId::ZoneX,
                    ..
                }
            ),
            "got: {err:?}"
        );
    }

    #[test]
    fn collect_rejects_negative_zone_and_nan() {
        let mut form = hydrated(&living_room(), &scenario_config());
        form.write(FieldId::ZoneY, "-4");
        assert!(collect_config(&form).is_err());

        let mut form = hydrated(&living_room(), &scenario_config());
        form.write(FieldId::SaturationBoost, "NaN");
        assert!(collect_config(&form).is_err());
    }

    #[test]
    fn collect_fails_without_a_selected_display() {
        // Configuration points at a display the selector does not list.
        let mut config = scenario_config();
        config.display_id = 9;
        let form = hydrated(&living_room(), &config);

        let err = collect_config(&form).unwrap_err();

        assert!(
            matches!(
                err,
                CoreError::InvalidField {
                    field: FieldId::DisplaySelect,
                    ..
                }
            ),
            "got: {err:?}"
        );
    }

    #[test]
    fn preset_name_is_trimmed() {
        let mut form = FormState::new();
        assert_eq!(preset_name(&form), None);

        form.write(FieldId::PresetName, "   ");
        assert_eq!(preset_name(&form), None);

        form.write(FieldId::PresetName, "  evening ");
        assert_eq!(preset_name(&form).as_deref(), Some("evening"));
    }

    #[test]
    fn diagnostics_render_as_indented_json() {
        let mut form = FormState::new();
        let snapshot = Diagnostics(json!({ "sync_state": { "status": "running" } }));

        render_diagnostics(&mut form, &snapshot);

        assert_eq!(
            form.diagnostics(),
            "{\n  \"sync_state\": {\n    \"status\": \"running\"\n  }\n}"
        );
    }

    #[test]
    fn diagnostics_keep_backend_key_order() {
        let mut form = FormState::new();
        let snapshot: Diagnostics =
            serde_json::from_str(r#"{"zone_rgb":[1,2,3],"fps":24.5,"analysis_hz":25}"#).unwrap();

        render_diagnostics(&mut form, &snapshot);

        let keys: Vec<&str> = form
            .diagnostics()
            .lines()
            .filter_map(|line| line.trim().strip_prefix('"')?.split('"').next())
            .collect();
        assert_eq!(keys, ["zone_rgb", "fps", "analysis_hz"]);
    }
}
