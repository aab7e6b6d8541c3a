// ── Field store ──
//
// The named inputs the session reads and writes. Front ends implement
// `FieldStore` over whatever surface they render; `FormState` is the
// headless implementation.

pub mod binder;

use std::collections::HashMap;

use url::Url;

/// Identifier of one named input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum FieldId {
    DisplaySelect,
    PreviewInterval,
    DarkThreshold,
    SaturationBoost,
    ZoneX,
    ZoneY,
    #[strum(serialize = "zoneW")]
    ZoneWidth,
    #[strum(serialize = "zoneH")]
    ZoneHeight,
    PresetName,
}

/// One entry of the display selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOption {
    pub value: String,
    pub label: String,
}

/// Readable and writable location for every [`FieldId`].
///
/// Values are strings, as typed by the operator. The display selector
/// behaves like an HTML `<select>`: writing a value with no matching
/// option clears the selection, and reading a cleared selector yields `""`.
pub trait FieldStore {
    fn read(&self, field: FieldId) -> String;

    fn write(&mut self, field: FieldId, value: &str);

    /// Discard the selector's options and install `options` in order.
    fn replace_display_options(&mut self, options: Vec<DisplayOption>);

    /// Overwrite the diagnostics panel with an already rendered snapshot.
    fn show_diagnostics(&mut self, rendered: &str);

    fn set_preview_source(&mut self, source: &Url);
}

// ── FormState ────────────────────────────────────────────────────────

/// In-memory [`FieldStore`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<FieldId, String>,
    display_options: Vec<DisplayOption>,
    selected_display: Option<usize>,
    diagnostics: String,
    preview_source: Option<Url>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_options(&self) -> &[DisplayOption] {
        &self.display_options
    }

    /// The option currently selected in the display selector.
    pub fn selected_display(&self) -> Option<&DisplayOption> {
        self.selected_display
            .and_then(|idx| self.display_options.get(idx))
    }

    /// Last rendered diagnostics snapshot (empty before the first load).
    pub fn diagnostics(&self) -> &str {
        &self.diagnostics
    }

    pub fn preview_source(&self) -> Option<&Url> {
        self.preview_source.as_ref()
    }
}

impl FieldStore for FormState {
    fn read(&self, field: FieldId) -> String {
        match field {
            FieldId::DisplaySelect => self
                .selected_display()
                .map(|opt| opt.value.clone())
                .unwrap_or_default(),
            other => self.values.get(&other).cloned().unwrap_or_default(),
        }
    }

    fn write(&mut self, field: FieldId, value: &str) {
        match field {
            FieldId::DisplaySelect => {
                self.selected_display = self
                    .display_options
                    .iter()
                    .position(|opt| opt.value == value);
            }
            other => {
                self.values.insert(other, value.to_owned());
            }
        }
    }

    fn replace_display_options(&mut self, options: Vec<DisplayOption>) {
        // A freshly populated single-select shows its first option.
        self.selected_display = if options.is_empty() { None } else { Some(0) };
        self.display_options = options;
    }

    fn show_diagnostics(&mut self, rendered: &str) {
        rendered.clone_into(&mut self.diagnostics);
    }

    fn set_preview_source(&mut self, source: &Url) {
        self.preview_source = Some(source.clone());
    }
}
