//! Beobachtbarer Tension-Wert mit expliziten Beobachtern.
//!
//! Formen registrieren sich beim Anlegen und melden sich beim Entfernen ab.
//! `set` liefert die Beobachter zurück; der Aufrufer baut sie synchron neu.

use super::ShapeId;

/// Handle einer Beobachter-Registrierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Tension-Wert im Bereich `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Tension {
    value: f32,
    watchers: Vec<(SubscriptionId, ShapeId)>,
    next_id: u64,
}

impl Tension {
    /// Untere Grenze.
    pub const MIN: f32 = 0.0;
    /// Obere Grenze.
    pub const MAX: f32 = 1.0;

    /// Erstellt den Wert (auf `[MIN, MAX]` begrenzt).
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(Self::MIN, Self::MAX),
            watchers: Vec::new(),
            next_id: 0,
        }
    }

    /// Aktueller Wert.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Registriert eine Form als Beobachter.
    pub fn subscribe(&mut self, shape: ShapeId) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.watchers.push((id, shape));
        id
    }

    /// Meldet einen Beobachter ab. `false` wenn unbekannt.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.watchers.len();
        self.watchers.retain(|(sub, _)| *sub != id);
        self.watchers.len() != before
    }

    /// Anzahl registrierter Beobachter.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Setzt den Wert und liefert die zu benachrichtigenden Formen.
    ///
    /// Unveränderte Werte benachrichtigen niemanden.
    pub fn set(&mut self, value: f32) -> Vec<ShapeId> {
        let value = value.clamp(Self::MIN, Self::MAX);
        if (value - self.value).abs() <= f32::EPSILON {
            return Vec::new();
        }
        self.value = value;
        self.watchers.iter().map(|(_, shape)| *shape).collect()
    }
}

impl Default for Tension {
    fn default() -> Self {
        Self::new(crate::shared::options::DEFAULT_TENSION)
    }
}
