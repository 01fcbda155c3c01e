use indexmap::IndexMap;

use crate::model::{Item, ItemId};

/// Every option the widget has ever known: the initial catalog plus created items.
///
/// Used for exact-name lookups during creation. Never consulted for selection.
#[derive(Debug, Clone, Default)]
pub struct OptionsCatalog {
    entries: IndexMap<ItemId, String>,
}

impl OptionsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ItemId, name: impl Into<String>) {
        self.entries.insert(id, name.into());
    }

    /// First entry whose name equals `query` ignoring case and surrounding whitespace
    pub fn lookup_exact_name_match(&self, query: &str) -> Option<Item> {
        let folded = query.trim().to_lowercase();
        if folded.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, name)| name.to_lowercase() == folded)
            .map(|(id, name)| Item::new(id.clone(), name.clone()))
    }

    /// Rewrite `old` to `new` in place. When `new` is already registered the
    /// `old` entry is dropped instead.
    pub fn rename(&mut self, old: &ItemId, new: ItemId) -> bool {
        let Some(index) = self.entries.get_index_of(old) else {
            return false;
        };
        if self.entries.contains_key(&new) {
            self.entries.shift_remove(old);
            return true;
        }
        if let Some((_, name)) = self.entries.shift_remove_index(index) {
            self.entries.shift_insert(index, new, name);
        }
        true
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn name(&self, id: &ItemId) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One backing row of the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub id: ItemId,
    pub name: String,
    pub visible: bool,
}

/// The synthetic "Create ..." row, always ordered after the catalog rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRow {
    /// Query captured when the row was last shown
    pub query: String,
    pub visible: bool,
}

/// The option list as displayed: catalog-backed rows plus the create row.
#[derive(Debug, Clone, Default)]
pub struct OptionRows {
    rows: Vec<OptionRow>,
    pub create: CreateRow,
}

impl OptionRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visible row. Rows with an id already present are ignored.
    pub fn push(&mut self, id: ItemId, name: impl Into<String>) -> bool {
        if self.position(&id).is_some() {
            return false;
        }
        self.rows.push(OptionRow {
            id,
            name: name.into(),
            visible: true,
        });
        true
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.rows.iter().position(|r| &r.id == id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&OptionRow> {
        self.rows.iter().find(|r| &r.id == id)
    }

    /// Retag the row `old` as `new`. If a row for `new` already exists the
    /// `old` row is removed instead.
    pub fn rename(&mut self, old: &ItemId, new: ItemId) -> bool {
        let Some(index) = self.position(old) else {
            return false;
        };
        if self.position(&new).is_some() {
            self.rows.remove(index);
        } else {
            self.rows[index].id = new;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionRow> {
        self.rows.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut OptionRow> {
        self.rows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let mut catalog = OptionsCatalog::new();
        catalog.register(id("7"), "Action");
        catalog.register(id("8"), "Action RPG");
        let hit = catalog.lookup_exact_name_match("  aCTION ").unwrap();
        assert_eq!(hit.id, id("7"));
        assert_eq!(hit.name, "Action");
        assert_eq!(catalog.lookup_exact_name_match("act"), None);
        assert_eq!(catalog.lookup_exact_name_match(""), None);
    }

    #[test]
    fn test_exact_match_returns_first_registered() {
        let mut catalog = OptionsCatalog::new();
        catalog.register(id("1"), "Tag");
        catalog.register(id("2"), "tag");
        assert_eq!(catalog.lookup_exact_name_match("TAG").unwrap().id, id("1"));
    }

    #[test]
    fn test_catalog_rename() {
        let mut catalog = OptionsCatalog::new();
        catalog.register(id("1"), "One");
        catalog.register(id("new_x"), "Two");
        assert!(catalog.rename(&id("new_x"), id("2")));
        assert_eq!(catalog.name(&id("2")), Some("Two"));
        assert!(!catalog.contains(&id("new_x")));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_rows_reject_duplicates() {
        let mut rows = OptionRows::new();
        assert!(rows.push(id("1"), "One"));
        assert!(!rows.push(id("1"), "Uno"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.get(&id("1")).unwrap().name, "One");
    }

    #[test]
    fn test_rows_rename_in_place_or_fold() {
        let mut rows = OptionRows::new();
        rows.push(id("1"), "One");
        rows.push(id("new_a"), "Two");
        rows.push(id("3"), "Three");
        assert!(rows.rename(&id("new_a"), id("2")));
        let order: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);

        rows.push(id("new_b"), "Three");
        assert!(rows.rename(&id("new_b"), id("3")));
        assert_eq!(rows.len(), 3);
    }
}
