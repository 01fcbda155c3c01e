use scraper::{ElementRef, Html, Selector};

use crate::model::{Item, ItemId, Targets, ThemeMode, WidgetConfig, WidgetConfigBuilder};
use crate::ops::widget::Picker;

/// Attribute namespace of the widget's data attributes
pub const NAMESPACE: &str = "multiselect";

/// Error type for reading server-rendered markup
#[derive(Debug, thiserror::Error)]
pub enum HydrateError {
    #[error("no multiselect root element found (expected data-controller=\"multiselect\")")]
    RootNotFound,
    #[error("invalid selector {selector}: {reason}")]
    Selector { selector: String, reason: String },
}

/// Everything the widget learns from the initial markup
#[derive(Debug, Clone)]
pub struct Hydrated {
    pub config: WidgetConfig,
    pub targets: Targets,
    /// Items with a badge, in badge order
    pub selected: Vec<Item>,
    /// Catalog rows, in list order
    pub options: Vec<Item>,
    /// Badges whose name could not be read
    pub skipped_badges: usize,
}

impl Hydrated {
    pub fn into_picker(self) -> Picker {
        let mut picker = Picker::new(self.config, self.targets);
        picker.hydrate(self.selected, self.options);
        picker
    }
}

fn selector(css: &str) -> Result<Selector, HydrateError> {
    Selector::parse(css).map_err(|e| HydrateError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

fn target_selector(name: &str) -> Result<Selector, HydrateError> {
    selector(&format!("[data-{NAMESPACE}-target=\"{name}\"]"))
}

fn find_target<'a>(root: &ElementRef<'a>, name: &str) -> Result<Option<ElementRef<'a>>, HydrateError> {
    Ok(root.select(&target_selector(name)?).next())
}

fn value_attr<'a>(root: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    root.value().attr(&format!("data-{NAMESPACE}-{name}-value"))
}

fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse a page or fragment containing one widget.
///
/// Only a missing root is an error; anything else that cannot be read is
/// skipped so the widget still comes up.
pub fn hydrate(html: &str) -> Result<Hydrated, HydrateError> {
    let document = Html::parse_document(html);
    let root_sel = selector(&format!("[data-controller~=\"{NAMESPACE}\"]"))?;
    let root = document
        .select(&root_sel)
        .next()
        .ok_or(HydrateError::RootNotFound)?;

    let csrf_sel = selector("meta[name=\"csrf-token\"]")?;
    let csrf_token = document
        .select(&csrf_sel)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::to_string);

    let builder = WidgetConfigBuilder {
        allow_create: value_attr(&root, "allow-create").is_some_and(|v| v.trim() == "true"),
        item_type: value_attr(&root, "item-type").map(str::to_string),
        input_name: value_attr(&root, "input-name").map(str::to_string),
        placeholder: value_attr(&root, "placeholder").map(str::to_string),
        create_prompt: value_attr(&root, "create-prompt").map(str::to_string),
        badge_class: value_attr(&root, "badge-class").map(str::to_string),
        api_endpoint: value_attr(&root, "api-endpoint").map(str::to_string),
        theme: value_attr(&root, "theme").map(ThemeMode::parse),
        csrf_token,
    };

    let input = find_target(&root, "input")?;
    let selected_items = find_target(&root, "selectedItems")?;
    let hidden_inputs = find_target(&root, "hiddenInputs")?;
    let dropdown = find_target(&root, "dropdown")?;
    let options_list = find_target(&root, "optionsList")?;
    let targets = Targets {
        input: input.is_some(),
        selected_items: selected_items.is_some(),
        hidden_inputs: hidden_inputs.is_some(),
        dropdown: dropdown.is_some(),
        options_list: options_list.is_some(),
    };

    let mut selected = Vec::new();
    let mut skipped_badges = 0;
    if let Some(container) = selected_items {
        let badge_sel = selector("[data-item-id]:not(button)")?;
        let names = BadgeNameSelectors::new()?;
        for badge in container.select(&badge_sel) {
            let Some(id) = badge.value().attr("data-item-id").and_then(ItemId::parse) else {
                continue;
            };
            match names.extract(&badge) {
                Some(name) => selected.push(Item::new(id, name)),
                None => {
                    tracing::warn!(%id, "badge has no readable name, skipping");
                    skipped_badges += 1;
                }
            }
        }
    }

    let mut options = Vec::new();
    if let Some(list) = options_list {
        let option_sel = selector("[data-option-id]")?;
        let label_sel = selector("span.flex-1")?;
        for option in list.select(&option_sel) {
            let Some(id) = option.value().attr("data-option-id").and_then(ItemId::parse) else {
                continue;
            };
            let name = option
                .value()
                .attr("data-option-name")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .or_else(|| option.select(&label_sel).next().map(|s| text_of(&s)))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| text_of(&option));
            if !name.is_empty() {
                options.push(Item::new(id, name));
            }
        }
    }

    Ok(Hydrated {
        config: builder.build(),
        targets,
        selected,
        options,
        skipped_badges,
    })
}

struct BadgeNameSelectors {
    named: Selector,
    first_span: Selector,
}

impl BadgeNameSelectors {
    fn new() -> Result<Self, HydrateError> {
        Ok(BadgeNameSelectors {
            named: selector("[data-item-name]")?,
            first_span: selector("span:first-child")?,
        })
    }

    /// Name of a badge, trying in order: the `data-item-name` child (its
    /// attribute, or its text when the attribute is empty or a bare flag),
    /// the first span child's text, then the first meaningful text node.
    fn extract(&self, badge: &ElementRef) -> Option<String> {
        if let Some(named) = badge.select(&self.named).next() {
            let attr = named.value().attr("data-item-name").unwrap_or("").trim();
            let name = if attr.is_empty() || attr == "true" {
                text_of(&named)
            } else {
                attr.to_string()
            };
            if !name.is_empty() {
                return Some(name);
            }
        }

        if let Some(span) = badge.select(&self.first_span).next() {
            let name = text_of(&span);
            if !name.is_empty() {
                return Some(name);
            }
        }

        badge
            .text()
            .map(str::trim)
            .find(|t| !t.is_empty() && *t != "\u{00d7}")
            .map(str::to_string)
    }
}
