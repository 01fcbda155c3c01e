use indexmap::IndexMap;

use crate::model::ItemId;

/// Ordered id → name mapping of the selected items.
///
/// Iteration order is badge order and hidden-input order. Membership here is
/// the only authority on whether an item is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    items: IndexMap<ItemId, String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if selected, otherwise add it. Returns true if it is now selected.
    pub fn toggle(&mut self, id: ItemId, name: impl Into<String>) -> bool {
        if self.items.shift_remove(&id).is_some() {
            false
        } else {
            self.items.insert(id, name.into());
            true
        }
    }

    /// Insert or overwrite `id`, moving it to the end of the iteration order.
    pub fn add(&mut self, id: ItemId, name: impl Into<String>) {
        self.items.shift_remove(&id);
        self.items.insert(id, name.into());
    }

    /// Deselect `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: &ItemId) -> Option<String> {
        self.items.shift_remove(id)
    }

    /// Deselect the most recently added item
    pub fn remove_last(&mut self) -> Option<(ItemId, String)> {
        self.items.pop()
    }

    /// Rewrite `old` to `new` in place, keeping position and name.
    /// If `new` is already selected, `old` is simply dropped.
    pub fn rename(&mut self, old: &ItemId, new: ItemId) -> bool {
        let Some(index) = self.items.get_index_of(old) else {
            return false;
        };
        if self.items.contains_key(&new) {
            self.items.shift_remove(old);
            return true;
        }
        if let Some((_, name)) = self.items.shift_remove_index(index) {
            self.items.shift_insert(index, new, name);
        }
        true
    }

    /// Replace the display name of a selected item without moving it
    pub fn set_name(&mut self, id: &ItemId, name: impl Into<String>) -> bool {
        match self.items.get_mut(id) {
            Some(current) => {
                *current = name.into();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&str> {
        self.items.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &str)> {
        self.items.iter().map(|(id, name)| (id, name.as_str()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    fn ids(store: &SelectionStore) -> Vec<&str> {
        store.ids().map(ItemId::as_str).collect()
    }

    #[test]
    fn test_toggle_parity() {
        let mut store = SelectionStore::new();
        let calls = ["1", "2", "1", "3", "1", "2"];
        for c in calls {
            store.toggle(id(c), c);
        }
        // "1" toggled 3 times, "2" twice, "3" once
        assert!(store.contains(&id("1")));
        assert!(!store.contains(&id("2")));
        assert!(store.contains(&id("3")));
    }

    #[test]
    fn test_toggle_parity_random_sequences() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        for seed in 0..25u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut store = SelectionStore::new();
            let mut counts = [0usize; 5];
            let len = rng.random_range(0..40);
            for _ in 0..len {
                let n = rng.random_range(0..counts.len());
                counts[n] += 1;
                let key = n.to_string();
                store.toggle(id(&key), key.as_str());
            }
            for (n, count) in counts.iter().enumerate() {
                assert_eq!(
                    store.contains(&id(&n.to_string())),
                    count % 2 == 1,
                    "seed {seed}, id {n}"
                );
            }
        }
    }

    #[test]
    fn test_set_name_keeps_position() {
        let mut store = SelectionStore::new();
        store.add(id("a"), "A");
        store.add(id("b"), "B");
        assert!(store.set_name(&id("a"), "Alpha"));
        assert!(!store.set_name(&id("z"), "Zed"));
        assert_eq!(ids(&store), vec!["a", "b"]);
        assert_eq!(store.get(&id("a")), Some("Alpha"));
    }

    #[test]
    fn test_add_moves_to_end() {
        let mut store = SelectionStore::new();
        store.add(id("a"), "A");
        store.add(id("b"), "B");
        store.add(id("a"), "A2");
        assert_eq!(ids(&store), vec!["b", "a"]);
        assert_eq!(store.get(&id("a")), Some("A2"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = SelectionStore::new();
        store.add(id("a"), "A");
        assert_eq!(store.remove(&id("a")), Some("A".to_string()));
        assert_eq!(store.remove(&id("a")), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_last() {
        let mut store = SelectionStore::new();
        assert_eq!(store.remove_last(), None);
        store.add(id("a"), "A");
        store.add(id("b"), "B");
        assert_eq!(store.remove_last().map(|(i, _)| i), Some(id("b")));
        assert_eq!(ids(&store), vec!["a"]);
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut store = SelectionStore::new();
        store.add(id("a"), "A");
        store.add(id("new_1"), "Fresh");
        store.add(id("c"), "C");
        assert!(store.rename(&id("new_1"), id("99")));
        assert_eq!(ids(&store), vec!["a", "99", "c"]);
        assert_eq!(store.get(&id("99")), Some("Fresh"));
        assert!(!store.rename(&id("missing"), id("100")));
    }

    #[test]
    fn test_rename_onto_existing_drops_old() {
        let mut store = SelectionStore::new();
        store.add(id("5"), "Five");
        store.add(id("new_1"), "Five");
        assert!(store.rename(&id("new_1"), id("5")));
        assert_eq!(ids(&store), vec!["5"]);
    }
}
