use serde::Serialize;

use crate::model::ItemId;

use super::{BadgeView, HiddenInput, RowView, Surface};

/// In-memory surface: keeps the last projection of every element.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub badges: Vec<BadgeView>,
    /// Server-rendered badges not yet replaced by a render
    #[serde(skip)]
    pub server_badges: usize,
    pub hidden_inputs: Vec<HiddenInput>,
    pub rows: Vec<RowView>,
    pub placeholder: String,
    pub input_value: String,
    pub dropdown_visible: bool,
}

impl Snapshot {
    /// A surface that still shows `count` badges from the initial markup
    pub fn with_server_badges(count: usize) -> Self {
        Snapshot {
            server_badges: count,
            ..Default::default()
        }
    }

    pub fn hidden_values(&self) -> Vec<&str> {
        self.hidden_inputs.iter().map(|i| i.value.as_str()).collect()
    }

    pub fn badge_names(&self) -> Vec<&str> {
        self.badges.iter().map(|b| b.name.as_str()).collect()
    }

    /// Visible rows in order, create row included
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn row(&self, id: &ItemId) -> Option<&RowView> {
        self.rows.iter().find(|r| r.id.as_ref() == Some(id))
    }
}

impl Surface for Snapshot {
    fn badge_count(&self) -> usize {
        self.badges.len() + self.server_badges
    }

    fn replace_badges(&mut self, badges: &[BadgeView]) {
        self.server_badges = 0;
        self.badges = badges.to_vec();
    }

    fn replace_hidden_inputs(&mut self, inputs: &[HiddenInput]) {
        self.hidden_inputs = inputs.to_vec();
    }

    fn update_rows(&mut self, rows: &[RowView]) {
        self.rows = rows.to_vec();
    }

    fn set_placeholder(&mut self, text: &str) {
        self.placeholder = text.to_string();
    }

    fn set_input_value(&mut self, value: &str) {
        self.input_value = value.to_string();
    }

    fn set_dropdown_visible(&mut self, visible: bool) {
        self.dropdown_visible = visible;
    }
}
