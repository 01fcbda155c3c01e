pub mod classes;
pub mod markup;
pub mod snapshot;

use serde::Serialize;

use crate::model::{ItemId, ThemeMode};
use crate::ops::selection::SelectionStore;
use crate::ops::widget::Picker;

pub use snapshot::Snapshot;

/// One selected-item badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub id: ItemId,
    pub name: String,
    pub class: String,
    pub button_class: String,
}

/// One hidden form input (`name=value`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenInput {
    pub name: String,
    pub value: String,
}

/// Presentation of a row in the option list. `id` is None for the create row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: Option<ItemId>,
    pub label: String,
    pub visible: bool,
    pub selected: bool,
    pub highlighted: bool,
    pub class: String,
}

/// The presentation surface. Only [`SyncRenderer`] writes to it.
///
/// Every method has a no-op default so embeddings that lack an element can
/// leave it out.
pub trait Surface {
    /// Badges currently displayed, including server-rendered ones
    fn badge_count(&self) -> usize {
        0
    }
    fn replace_badges(&mut self, _badges: &[BadgeView]) {}
    fn replace_hidden_inputs(&mut self, _inputs: &[HiddenInput]) {}
    fn update_rows(&mut self, _rows: &[RowView]) {}
    fn set_placeholder(&mut self, _text: &str) {}
    fn set_input_value(&mut self, _value: &str) {}
    fn set_dropdown_visible(&mut self, _visible: bool) {}
}

/// Surface that displays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {}

/// Badges in selection order
pub fn badges(selection: &SelectionStore, badge_class: &str, theme: ThemeMode) -> Vec<BadgeView> {
    selection
        .iter()
        .map(|(id, name)| BadgeView {
            id: id.clone(),
            name: name.to_string(),
            class: badge_class.to_string(),
            button_class: classes::remove_button(theme).to_string(),
        })
        .collect()
}

/// One input per selected id in selection order, or a single empty input so
/// the form still submits an empty array for the field.
pub fn hidden_inputs(selection: &SelectionStore, input_name: &str) -> Vec<HiddenInput> {
    if selection.is_empty() {
        return vec![HiddenInput {
            name: input_name.to_string(),
            value: String::new(),
        }];
    }
    selection
        .ids()
        .map(|id| HiddenInput {
            name: input_name.to_string(),
            value: id.to_string(),
        })
        .collect()
}

/// Row presentation from selection membership, visibility and highlight
pub fn row_views(picker: &Picker) -> Vec<RowView> {
    let theme = picker.config().theme;
    let highlight = picker.dropdown().highlighted();
    let mut visible_index = 0usize;
    let mut views = Vec::with_capacity(picker.rows().len() + 1);

    for row in picker.rows().iter() {
        let highlighted = row.visible && highlight == Some(visible_index);
        if row.visible {
            visible_index += 1;
        }
        let selected = picker.selection().contains(&row.id);
        views.push(RowView {
            id: Some(row.id.clone()),
            label: row.name.clone(),
            visible: row.visible,
            selected,
            highlighted,
            class: classes::option_row(theme, selected, highlighted),
        });
    }

    let create = &picker.rows().create;
    let highlighted = create.visible && highlight == Some(visible_index);
    let mut class = classes::create_row(theme).to_string();
    if highlighted {
        class.push(' ');
        class.push_str(classes::highlighted(theme));
    }
    views.push(RowView {
        id: None,
        label: create.query.clone(),
        visible: create.visible,
        selected: false,
        highlighted,
        class,
    });
    views
}

/// Projects picker state onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct SyncRenderer {
    hydrated: bool,
}

impl SyncRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server-rendered badges have been read into the selection store
    pub fn mark_hydrated(&mut self) {
        self.hydrated = true;
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Replace all badges. Skipped while the store is empty but server-rendered
    /// badges are still on screen and hydration has not run, so the initial
    /// markup is not wiped. Returns whether badges were written.
    pub fn render_badges<S: Surface>(&self, picker: &Picker, surface: &mut S) -> bool {
        if !picker.targets().selected_items {
            return false;
        }
        let selection = picker.selection();
        if selection.is_empty() && surface.badge_count() > 0 && !self.hydrated {
            return false;
        }
        let config = picker.config();
        surface.replace_badges(&badges(selection, &config.badge_class, config.theme));
        if picker.targets().input {
            let placeholder = if selection.is_empty() {
                config.placeholder.as_str()
            } else {
                ""
            };
            surface.set_placeholder(placeholder);
        }
        true
    }

    pub fn render_hidden_inputs<S: Surface>(&self, picker: &Picker, surface: &mut S) {
        if !picker.targets().hidden_inputs {
            return;
        }
        surface.replace_hidden_inputs(&hidden_inputs(
            picker.selection(),
            &picker.config().input_name,
        ));
    }

    pub fn reflect_selection_on_catalog_rows<S: Surface>(&self, picker: &Picker, surface: &mut S) {
        if !picker.targets().options_list {
            return;
        }
        surface.update_rows(&row_views(picker));
    }

    /// Full re-projection after an event
    pub fn sync<S: Surface>(&self, picker: &Picker, surface: &mut S) {
        self.render_badges(picker, surface);
        self.render_hidden_inputs(picker, surface);
        self.reflect_selection_on_catalog_rows(picker, surface);
        if picker.targets().input {
            surface.set_input_value(picker.query());
        }
        if picker.targets().dropdown {
            surface.set_dropdown_visible(picker.dropdown().is_open());
        }
    }
}
