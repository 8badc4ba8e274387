//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `app`, `shape` und `ui` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod render_scene;
pub mod spline_geometry;

pub use options::EditorOptions;
pub use render_scene::{RenderLight, RenderLine, RenderMesh, RenderScene};
pub use spline_geometry::{CatmullRomCurve, CurveType};
