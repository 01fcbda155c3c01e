//! Theme-gated class lists for the widget's presentation.
//!
//! `Auto` carries both palettes, with `dark:` variants, so the host page's
//! color-scheme decides. `Light` and `Dark` pin one palette.

use crate::model::ThemeMode;

const BADGE_BASE: &str = "inline-flex items-center rounded-md px-2 py-1 text-xs font-medium gap-1";

pub const ROW_BASE: &str = "px-3 py-2 text-sm cursor-pointer flex items-center";

pub fn default_badge(theme: ThemeMode) -> String {
    let palette = match theme {
        ThemeMode::Dark => "bg-blue-900/30 text-blue-200 border border-blue-800",
        ThemeMode::Light => "bg-blue-100 text-blue-800 border border-blue-200",
        ThemeMode::Auto => {
            "bg-blue-100 text-blue-800 border border-blue-200 \
             dark:bg-blue-900/30 dark:text-blue-200 dark:border-blue-800"
        }
    };
    format!("{} {}", BADGE_BASE, palette)
}

pub fn remove_button(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Dark => "ml-1 group relative h-3.5 w-3.5 rounded-sm hover:bg-gray-400/20",
        ThemeMode::Light => "ml-1 group relative h-3.5 w-3.5 rounded-sm hover:bg-gray-600/20",
        ThemeMode::Auto => {
            "ml-1 group relative h-3.5 w-3.5 rounded-sm hover:bg-gray-600/20 dark:hover:bg-gray-400/20"
        }
    }
}

pub fn selected_row(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Dark => "bg-blue-600 text-white hover:bg-blue-700",
        ThemeMode::Light => "bg-blue-500 text-white hover:bg-blue-600",
        ThemeMode::Auto => {
            "bg-blue-500 text-white hover:bg-blue-600 dark:bg-blue-600 dark:hover:bg-blue-700"
        }
    }
}

pub fn unselected_row(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Dark => "text-gray-300 hover:bg-gray-700",
        ThemeMode::Light => "text-gray-700 hover:bg-gray-100",
        ThemeMode::Auto => "text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700",
    }
}

pub fn highlighted(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Dark => "bg-gray-600 ring-1 ring-blue-500",
        ThemeMode::Light => "bg-gray-100 ring-1 ring-blue-500",
        ThemeMode::Auto => "bg-gray-100 dark:bg-gray-600 ring-1 ring-blue-500",
    }
}

pub fn create_row(theme: ThemeMode) -> &'static str {
    match theme {
        ThemeMode::Dark => {
            "px-3 py-2 text-sm cursor-pointer border-t text-gray-300 hover:bg-gray-700 border-gray-700"
        }
        ThemeMode::Light => {
            "px-3 py-2 text-sm cursor-pointer border-t text-gray-700 hover:bg-gray-100 border-gray-200"
        }
        ThemeMode::Auto => {
            "px-3 py-2 text-sm cursor-pointer border-t text-gray-700 dark:text-gray-300 \
             hover:bg-gray-100 dark:hover:bg-gray-700 border-gray-200 dark:border-gray-700"
        }
    }
}

/// Full class attribute for a catalog row
pub fn option_row(theme: ThemeMode, selected: bool, is_highlighted: bool) -> String {
    let state = if selected {
        selected_row(theme)
    } else {
        unselected_row(theme)
    };
    let mut class = format!("{} {}", ROW_BASE, state);
    if is_highlighted {
        class.push(' ');
        class.push_str(highlighted(theme));
    }
    class
}
