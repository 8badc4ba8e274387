//! UI-Layer mit egui: Viewport, Seitenpanel, Kontextmenü und Statusleiste.

mod context_menu;
pub mod input;
pub mod panel;
pub mod status;
pub mod viewport;

pub use context_menu::show_context_menu;
pub use input::InputState;
pub use panel::{render_side_panel, PanelState};
pub use status::render_status_bar;
pub use viewport::paint_scene;
