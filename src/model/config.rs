use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEM_TYPE: &str = "item";
pub const DEFAULT_PLACEHOLDER: &str = "Search or select...";
pub const DEFAULT_INPUT_NAME: &str = "item_ids[]";

/// Color scheme the widget's classes are gated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    /// Parse a theme attribute. Unknown values fall back to `Auto`.
    pub fn parse(s: &str) -> ThemeMode {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }
}

/// Per-instance widget configuration, read from the root container's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub allow_create: bool,
    pub item_type: String,
    /// Form field name for the hidden inputs (Rails array convention, e.g. `game[tag_ids][]`)
    pub input_name: String,
    pub placeholder: String,
    pub create_prompt: String,
    pub badge_class: String,
    /// Endpoint that persists newly created items. None keeps creation local.
    pub api_endpoint: Option<String>,
    pub theme: ThemeMode,
    /// Anti-forgery token sent with creation requests
    pub csrf_token: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig::builder().build()
    }
}

impl WidgetConfig {
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::default()
    }
}

/// Collects optional attribute values and fills the gaps with defaults.
/// Blank strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct WidgetConfigBuilder {
    pub allow_create: bool,
    pub item_type: Option<String>,
    pub input_name: Option<String>,
    pub placeholder: Option<String>,
    pub create_prompt: Option<String>,
    pub badge_class: Option<String>,
    pub api_endpoint: Option<String>,
    pub theme: Option<ThemeMode>,
    pub csrf_token: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl WidgetConfigBuilder {
    pub fn allow_create(mut self, allow: bool) -> Self {
        self.allow_create = allow;
        self
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self
    }

    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn build(self) -> WidgetConfig {
        let theme = self.theme.unwrap_or_default();
        let item_type = non_blank(self.item_type).unwrap_or_else(|| DEFAULT_ITEM_TYPE.to_string());
        let create_prompt =
            non_blank(self.create_prompt).unwrap_or_else(|| format!("Create \"{}\"", item_type));
        WidgetConfig {
            allow_create: self.allow_create,
            input_name: non_blank(self.input_name)
                .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string()),
            placeholder: non_blank(self.placeholder)
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            badge_class: non_blank(self.badge_class)
                .unwrap_or_else(|| crate::render::classes::default_badge(theme)),
            api_endpoint: non_blank(self.api_endpoint),
            csrf_token: non_blank(self.csrf_token),
            create_prompt,
            item_type,
            theme,
        }
    }
}

/// Which optional UI elements the embedding provides. Operations that need a
/// missing element become no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub input: bool,
    pub selected_items: bool,
    pub hidden_inputs: bool,
    pub dropdown: bool,
    pub options_list: bool,
}

impl Default for Targets {
    fn default() -> Self {
        Targets {
            input: true,
            selected_items: true,
            hidden_inputs: true,
            dropdown: true,
            options_list: true,
        }
    }
}

/// Settings file for the `msel` driver (`--config path.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Base URL that relative creation endpoints are resolved against
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            base_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// EnvFilter directive, e.g. "info" or "multiselect=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Logging is off when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
