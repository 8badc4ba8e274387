//! AppIntent-, AppCommand- und AppEvent-Enums für den Intent/Command-Datenfluss.

mod app_event;
mod command;
mod intent;

pub use app_event::{AppEvent, EventOutcome, ScreenAnchor};
pub use command::AppCommand;
pub use intent::{AppIntent, Key, PointerButton, ShapeKind};
