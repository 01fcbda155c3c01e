use serde::Serialize;

use crate::model::ItemId;
use crate::render::markup;
use crate::render::{BadgeView, HiddenInput, RowView};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SelectedJson {
    pub id: ItemId,
    pub name: String,
}

#[derive(Serialize)]
pub struct RenderJson {
    pub item_type: String,
    pub selected: Vec<SelectedJson>,
    /// What the form would submit
    pub hidden_inputs: Vec<HiddenInput>,
    pub rows: Vec<RowView>,
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped_badges: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Re-rendered regions, each under an HTML comment naming its target
pub fn format_regions(badges: &[BadgeView], inputs: &[HiddenInput], rows: &[RowView]) -> String {
    let mut out = String::new();
    for (target, body) in [
        ("selectedItems", markup::badges_html(badges)),
        ("hiddenInputs", markup::hidden_inputs_html(inputs)),
        ("optionsList", markup::rows_html(rows)),
    ] {
        out.push_str(&format!("<!-- {target} -->\n"));
        if !body.is_empty() {
            out.push_str(&body);
            out.push('\n');
        }
    }
    out
}

/// `name=value` lines, one per hidden input
pub fn format_submission(inputs: &[HiddenInput]) -> String {
    inputs
        .iter()
        .map(|i| format!("{}={}\n", i.name, i.value))
        .collect()
}
