//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod avatar;
pub mod dialog;
pub mod light;
pub mod pointer;
pub mod shape;
pub mod view;
