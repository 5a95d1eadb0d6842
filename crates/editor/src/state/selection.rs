use shared::EntityId;

use crate::host::SceneHost;

/// Entity selection state (supports multi-select)
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    /// Selected entity IDs (in order of selection)
    selected: Vec<EntityId>,
}

impl SelectionState {
    /// Primary (first) selected entity
    pub fn primary(&self) -> Option<&EntityId> {
        self.selected.first()
    }

    /// All selected entities
    pub fn all(&self) -> &[EntityId] {
        &self.selected
    }

    /// Check if an entity is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Add an entity to the selection. Selecting twice is a no-op.
    pub fn select(&mut self, id: EntityId) -> bool {
        if self.is_selected(&id) {
            return false;
        }
        self.selected.push(id);
        true
    }

    /// Drop one entity from the selection
    pub fn remove(&mut self, id: &str) -> bool {
        match self.selected.iter().position(|s| s == id) {
            Some(pos) => {
                self.selected.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected entities
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Ask the host for the entity under a screen point
    pub fn pick<H: SceneHost + ?Sized>(
        &self,
        host: &H,
        x: i32,
        y: i32,
        tolerance_px: f32,
    ) -> Option<EntityId> {
        host.pick(x, y, tolerance_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.primary().is_none());
        assert!(s.all().is_empty());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_select_is_additive() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        s.select("b".to_string());
        assert_eq!(s.count(), 2);
        assert!(s.is_selected("a"));
        assert!(s.is_selected("b"));
    }

    #[test]
    fn test_select_idempotent() {
        let mut s = SelectionState::default();
        assert!(s.select("a".to_string()));
        assert!(!s.select("a".to_string()));
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_remove() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        s.select("b".to_string());
        assert!(s.remove("a"));
        assert!(!s.remove("a"));
        assert_eq!(s.all(), &["b".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        s.select("b".to_string());
        s.clear();
        assert_eq!(s.count(), 0);
        assert!(s.primary().is_none());
    }

    #[test]
    fn test_primary_returns_first() {
        let mut s = SelectionState::default();
        s.select("a".to_string());
        s.select("b".to_string());
        s.select("c".to_string());
        assert_eq!(s.primary(), Some(&"a".to_string()));
    }
}
