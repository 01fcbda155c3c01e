use crate::model::Item;

use super::catalog::{OptionRows, OptionsCatalog};

/// An entry of the visible-option list, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleOption {
    /// A catalog-backed row
    Existing(Item),
    /// The synthetic create row carrying its stored query
    Create(String),
}

/// Filter `rows` against `query` and decide whether the create row is shown.
///
/// Rows stay visible iff their name contains the trimmed, lower-cased query.
/// The create row is shown when creation is allowed, the trimmed query is
/// non-empty, and no catalog name matches it exactly (ignoring case); it then
/// carries the trimmed query with its original casing.
pub fn apply(query: &str, rows: &mut OptionRows, catalog: &OptionsCatalog, allow_create: bool) {
    let trimmed = query.trim();
    let needle = trimmed.to_lowercase();

    for row in rows.iter_mut() {
        row.visible = needle.is_empty() || row.name.to_lowercase().contains(&needle);
    }

    let show_create = allow_create
        && !trimmed.is_empty()
        && catalog.lookup_exact_name_match(trimmed).is_none();
    if show_create {
        rows.create.query = trimmed.to_string();
        rows.create.visible = true;
    } else {
        rows.create.visible = false;
    }
}

/// Make every row visible again and hide the create row
pub fn reset(rows: &mut OptionRows) {
    for row in rows.iter_mut() {
        row.visible = true;
    }
    rows.create.visible = false;
}

/// Derive the visible-option list: visible rows in order, create row last.
pub fn visible_options(rows: &OptionRows) -> Vec<VisibleOption> {
    let mut visible: Vec<VisibleOption> = rows
        .iter()
        .filter(|r| r.visible)
        .map(|r| VisibleOption::Existing(Item::new(r.id.clone(), r.name.clone())))
        .collect();
    if rows.create.visible {
        visible.push(VisibleOption::Create(rows.create.query.clone()));
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use pretty_assertions::assert_eq;

    fn fixture() -> (OptionRows, OptionsCatalog) {
        let mut rows = OptionRows::new();
        let mut catalog = OptionsCatalog::new();
        for (id, name) in [("1", "Action"), ("2", "Puzzle"), ("7", "Action RPG")] {
            let id = ItemId::parse(id).unwrap();
            rows.push(id.clone(), name);
            catalog.register(id, name);
        }
        (rows, catalog)
    }

    fn names(rows: &OptionRows) -> Vec<String> {
        visible_options(rows)
            .into_iter()
            .map(|o| match o {
                VisibleOption::Existing(item) => item.name,
                VisibleOption::Create(q) => format!("+{}", q),
            })
            .collect()
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let (mut rows, catalog) = fixture();
        apply("   ", &mut rows, &catalog, true);
        assert_eq!(names(&rows), vec!["Action", "Puzzle", "Action RPG"]);
    }

    #[test]
    fn test_substring_case_insensitive() {
        let (mut rows, catalog) = fixture();
        apply("ACT", &mut rows, &catalog, false);
        assert_eq!(names(&rows), vec!["Action", "Action RPG"]);
    }

    #[test]
    fn test_create_row_payload_keeps_case() {
        let (mut rows, catalog) = fixture();
        apply("  Strategy ", &mut rows, &catalog, true);
        assert_eq!(names(&rows), vec!["+Strategy"]);
    }

    #[test]
    fn test_exact_match_suppresses_create() {
        let (mut rows, catalog) = fixture();
        for query in ["action", "ACTION", "Action"] {
            apply(query, &mut rows, &catalog, true);
            assert!(!rows.create.visible, "create shown for {query}");
            assert_eq!(names(&rows), vec!["Action", "Action RPG"]);
        }
    }

    #[test]
    fn test_create_disallowed() {
        let (mut rows, catalog) = fixture();
        apply("rpg2", &mut rows, &catalog, false);
        assert!(visible_options(&rows).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let (mut rows, catalog) = fixture();
        apply("zz", &mut rows, &catalog, true);
        let first = visible_options(&rows);
        apply("zz", &mut rows, &catalog, true);
        assert_eq!(visible_options(&rows), first);
    }

    #[test]
    fn test_reset() {
        let (mut rows, catalog) = fixture();
        apply("zz", &mut rows, &catalog, true);
        reset(&mut rows);
        assert_eq!(names(&rows), vec!["Action", "Puzzle", "Action RPG"]);
    }
}
