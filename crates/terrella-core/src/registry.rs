//! Append-only marker registry with stable identifiers

use serde::{Deserialize, Serialize};

use crate::geo::GeoLocation;

/// Identifier for a registered marker, 1-based and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One registered marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// Identifier assigned at registration
    pub id: MarkerId,
    /// The location as submitted
    pub location: GeoLocation,
    /// Anchor on the globe surface, in the globe's local frame
    pub anchor: [f64; 3],
}

/// Append-only ordered collection of markers.
///
/// Insertion order equals identifier order. There is no removal, so
/// identifier `n` always lives at index `n - 1`. Selection is held here as
/// a single nullable identifier rather than as per-element flags.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    records: Vec<MarkerRecord>,
    selected: Option<MarkerId>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker and assign it the next identifier
    pub fn add(&mut self, location: GeoLocation, anchor: [f64; 3]) -> MarkerId {
        let id = MarkerId(self.records.len() as u32 + 1);
        self.records.push(MarkerRecord {
            id,
            location,
            anchor,
        });
        id
    }

    /// All records in registration order
    pub fn all(&self) -> &[MarkerRecord] {
        &self.records
    }

    pub fn get(&self, id: MarkerId) -> Option<&MarkerRecord> {
        let index = id.0.checked_sub(1)? as usize;
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Toggle selection of one marker; at most one is selected at a time.
    ///
    /// Selecting an already-selected marker deselects it; selecting any
    /// other marker replaces the previous selection.
    pub fn toggle_selected(&mut self, id: MarkerId) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn selected(&self) -> Option<MarkerId> {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str) -> GeoLocation {
        GeoLocation::new(10.0, 20.0, name)
    }

    #[test]
    fn test_identifiers_start_at_one_and_increase() {
        let mut registry = MarkerRegistry::new();
        let a = registry.add(location("a"), [0.0, 0.0, 2.0]);
        let b = registry.add(location("b"), [0.0, 2.0, 0.0]);
        let c = registry.add(location("c"), [2.0, 0.0, 0.0]);
        assert_eq!((a, b, c), (MarkerId(1), MarkerId(2), MarkerId(3)));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_insertion_order_equals_identifier_order() {
        let mut registry = MarkerRegistry::new();
        for i in 0..5 {
            registry.add(location(&format!("m{i}")), [0.0; 3]);
        }
        let ids: Vec<u32> = registry.all().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_get_by_identifier() {
        let mut registry = MarkerRegistry::new();
        registry.add(location("a"), [0.0; 3]);
        let b = registry.add(location("b"), [1.0, 2.0, 3.0]);
        let record = registry.get(b).unwrap();
        assert_eq!(record.location.name, "b");
        assert_eq!(record.anchor, [1.0, 2.0, 3.0]);
        assert!(registry.get(MarkerId(0)).is_none());
        assert!(registry.get(MarkerId(99)).is_none());
    }

    #[test]
    fn test_duplicate_coordinates_are_allowed() {
        let mut registry = MarkerRegistry::new();
        let a = registry.add(location("first"), [0.0, 0.0, 2.0]);
        let b = registry.add(location("second"), [0.0, 0.0, 2.0]);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_selection_toggles_and_is_exclusive() {
        let mut registry = MarkerRegistry::new();
        let a = registry.add(location("a"), [0.0; 3]);
        let b = registry.add(location("b"), [0.0; 3]);

        assert_eq!(registry.selected(), None);
        registry.toggle_selected(a);
        assert_eq!(registry.selected(), Some(a));
        registry.toggle_selected(b);
        assert_eq!(registry.selected(), Some(b));
        registry.toggle_selected(b);
        assert_eq!(registry.selected(), None);
    }
}
