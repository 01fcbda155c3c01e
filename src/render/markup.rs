//! HTML fragments for the widget's dynamic regions.
//!
//! The output follows the same attribute contract hydration reads, so a
//! fragment rendered here hydrates back into the same state.

use super::{BadgeView, HiddenInput, RowView};

/// Escape text for use in element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn badge_html(badge: &BadgeView) -> String {
    let id = escape_html(badge.id.as_str());
    let name = escape_html(&badge.name);
    format!(
        "<span class=\"{}\" data-item-id=\"{id}\">\
         <span data-item-name=\"{name}\">{name}</span>\
         <button type=\"button\" data-action=\"click->multiselect#remove\" data-item-id=\"{id}\" class=\"{}\">\u{00d7}</button>\
         </span>",
        escape_html(&badge.class),
        escape_html(&badge.button_class),
    )
}

pub fn badges_html(badges: &[BadgeView]) -> String {
    badges.iter().map(badge_html).collect::<Vec<_>>().join("\n")
}

pub fn hidden_inputs_html(inputs: &[HiddenInput]) -> String {
    inputs
        .iter()
        .map(|i| {
            format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape_html(&i.name),
                escape_html(&i.value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Option list rows. Hidden rows stay in the markup with `display: none`.
pub fn rows_html(rows: &[RowView]) -> String {
    let mut out = String::new();
    for row in rows {
        let style = if row.visible {
            ""
        } else {
            " style=\"display: none\""
        };
        let label = escape_html(&row.label);
        let line = match &row.id {
            Some(id) => format!(
                "<div data-option-id=\"{}\" data-option-name=\"{label}\" class=\"{}\"{style}>\
                 <span class=\"flex-1\">{label}</span></div>",
                escape_html(id.as_str()),
                escape_html(&row.class),
            ),
            None => format!(
                "<div data-multiselect-target=\"createOption\" data-create-query=\"{label}\" class=\"{}\"{style}>\
                 Create \"<span class=\"font-medium\">{label}</span>\"</div>",
                escape_html(&row.class),
            ),
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
    }
    out
}
