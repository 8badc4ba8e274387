//! Registrierte Pointer-Listener mit expliziter Abmeldung.
//!
//! Jede Form und jeder Avatar meldet genau einen Listener an. Pointer-Down
//! geht an den Listener mit dem kamera-nächsten Treffer; bei gleichem Abstand
//! gewinnt der zuerst registrierte.

use super::drag::DragState;
use crate::core::ObjectId;
use crate::shape::ShapeId;

/// Handle eines Listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Besitzer eines Listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOwner {
    Shape(ShapeId),
    Avatar(ObjectId),
}

/// Ein Listener mit eigenem Drag-Zustand.
#[derive(Debug, Clone)]
pub struct Listener {
    pub id: ListenerId,
    pub owner: ListenerOwner,
    pub drag: DragState,
}

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, owner: ListenerOwner) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            owner,
            drag: DragState::Idle,
        });
        log::debug!("Listener {:?} für {:?} registriert", id, owner);
        id
    }

    /// Meldet einen Listener ab. `false` wenn unbekannt.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Meldet alle Listener eines Besitzers ab und liefert deren Anzahl.
    pub fn unregister_owner(&mut self, owner: ListenerOwner) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.owner != owner);
        before - self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn is_registered(&self, owner: ListenerOwner) -> bool {
        self.listeners.iter().any(|l| l.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.iter()
    }

    pub fn get_mut(&mut self, id: ListenerId) -> Option<&mut Listener> {
        self.listeners.iter_mut().find(|l| l.id == id)
    }

    /// Listener mit laufendem Drag.
    pub fn active_drag(&self) -> Option<&Listener> {
        self.listeners.iter().find(|l| l.drag.is_dragging())
    }

    pub fn active_drag_mut(&mut self) -> Option<&mut Listener> {
        self.listeners.iter_mut().find(|l| l.drag.is_dragging())
    }
}
