//! Handler für Kontextmenü, Optionen und Anwendungssteuerung.

use crate::app::AppState;
use crate::shared::EditorOptions;

/// Schließt das Kontextmenü.
pub fn close_context_menu(state: &mut AppState) {
    state.ui.context_menu = None;
}

/// Übernimmt neue Optionen. Gilt für ab jetzt angelegte Formen und Drags.
pub fn apply_options(state: &mut AppState, options: EditorOptions) {
    state.options = options;
    state.ui.status_message = Some("Optionen übernommen".to_string());
}

/// Speichert die Optionen neben der Binary.
pub fn save_options(state: &mut AppState) -> anyhow::Result<()> {
    state.options.save_to_file(&EditorOptions::config_path())?;
    state.ui.status_message = Some("Optionen gespeichert".to_string());
    Ok(())
}

/// Signalisiert dem Host das Beenden.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}
