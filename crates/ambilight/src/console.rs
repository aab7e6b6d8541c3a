//! Terminal-backed field store.
//!
//! Wraps the in-memory `FormState`; when following, every diagnostics
//! snapshot is also printed as it arrives.

use std::io::{self, Write};

use chrono::Local;
use url::Url;

use ambilight_core::{Diagnostics, DisplayOption, FieldId, FieldStore, FormState};

use crate::output;

#[derive(Debug, Default)]
pub struct ConsoleView {
    form: FormState,
    follow: bool,
    color: bool,
}

impl ConsoleView {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Print each diagnostics snapshot from now on.
    pub fn follow(&mut self) {
        self.follow = true;
    }

    /// Snapshot as a one-line header plus the rendered panel.
    pub fn format_snapshot(&self, rendered: &str) -> String {
        let status = serde_json::from_str(rendered)
            .ok()
            .map(Diagnostics)
            .and_then(|d| d.sync_status());
        format!(
            "── {} ── sync: {}\n{rendered}",
            Local::now().format("%H:%M:%S"),
            output::sync_status_label(status, self.color)
        )
    }
}

impl FieldStore for ConsoleView {
    fn read(&self, field: FieldId) -> String {
        self.form.read(field)
    }

    fn write(&mut self, field: FieldId, value: &str) {
        self.form.write(field, value);
    }

    fn replace_display_options(&mut self, options: Vec<DisplayOption>) {
        self.form.replace_display_options(options);
    }

    fn show_diagnostics(&mut self, rendered: &str) {
        self.form.show_diagnostics(rendered);
        if self.follow {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", self.format_snapshot(rendered));
        }
    }

    fn set_preview_source(&mut self, source: &Url) {
        self.form.set_preview_source(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_header_names_sync_state() {
        let view = ConsoleView::new(false);
        let text = view.format_snapshot("{\n  \"sync_state\": {\n    \"status\": \"paused\"\n  }\n}");
        let header = text.lines().next().unwrap_or_default();
        assert!(header.ends_with("sync: paused"), "got: {header}");
    }

    #[test]
    fn delegates_to_form_state() {
        let mut view = ConsoleView::new(false);
        view.write(FieldId::PresetName, "evening");
        view.show_diagnostics("{}");

        assert_eq!(view.read(FieldId::PresetName), "evening");
        assert_eq!(view.form().diagnostics(), "{}");
    }
}
