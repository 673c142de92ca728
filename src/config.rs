use crate::error::ConfigError;
use crate::focus::DEFAULT_HIGHLIGHT_MARGIN;
use crate::page::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the results-page navigator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Name the plugin registers under
    #[serde(default = "default_plugin_name")]
    pub plugin_name: String,

    /// Regex a page URL must match for the plugin to be active
    #[serde(default = "default_url_pattern")]
    pub url_pattern: String,

    /// Regex patterns that deactivate the plugin even when `url_pattern` matches
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Distance kept between the focused link and the viewport edges
    #[serde(default = "default_highlight_margin")]
    pub highlight_margin: f64,

    /// Style marker applied to the focused link
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,

    /// Chord overrides keyed by action, e.g. `"nextLink": "ctrl+n"`
    #[serde(default)]
    pub shortcuts: BTreeMap<String, String>,

    /// CSS selectors used to extract the page model from HTML
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// URL for the WebDriver instance used to load live pages
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// Selectors locating navigable elements on a results page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Result links, in document order
    #[serde(default = "default_link_selector")]
    pub links: String,

    #[serde(default = "default_next_page_selector")]
    pub next_page: String,

    #[serde(default = "default_prev_page_selector")]
    pub prev_page: String,

    /// Anchors forming the category tab bar
    #[serde(default = "default_tab_selector")]
    pub tabs: String,

    /// Substring of a tab anchor's href identifying its category
    #[serde(default = "default_tab_markers")]
    pub tab_markers: HashMap<Category, String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            links: default_link_selector(),
            next_page: default_next_page_selector(),
            prev_page: default_prev_page_selector(),
            tabs: default_tab_selector(),
            tab_markers: default_tab_markers(),
        }
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            plugin_name: default_plugin_name(),
            url_pattern: default_url_pattern(),
            exclude_patterns: default_exclude_patterns(),
            highlight_margin: default_highlight_margin(),
            highlight_class: default_highlight_class(),
            shortcuts: BTreeMap::new(),
            selectors: SelectorConfig::default(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

impl NavigatorConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = Self::from_json(&contents)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply environment overrides (`WEBDRIVER_URL`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

fn default_plugin_name() -> String {
    "Google".to_string()
}

/// Google web-search result pages on any country domain
fn default_url_pattern() -> String {
    r"^https://www\.google\.[a-z]{2,3}(?:\.[a-z]{2,3})*/search\?".to_string()
}

/// Image search has its own grid layout
fn default_exclude_patterns() -> Vec<String> {
    vec![r"tbm=isch".to_string()]
}

fn default_highlight_margin() -> f64 {
    DEFAULT_HIGHLIGHT_MARGIN
}

fn default_highlight_class() -> String {
    "serp-nav-focused".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_link_selector() -> String {
    "h3.r a".to_string()
}

fn default_next_page_selector() -> String {
    "#pnnext".to_string()
}

fn default_prev_page_selector() -> String {
    "#pnprev".to_string()
}

fn default_tab_selector() -> String {
    r#"a[class="q qs"]"#.to_string()
}

fn default_tab_markers() -> HashMap<Category, String> {
    HashMap::from([
        (Category::Images, "&tbm=isch".to_string()),
        (Category::Videos, "&tbm=vid".to_string()),
        (Category::Maps, "maps.google.".to_string()),
        (Category::News, "&tbm=nws".to_string()),
        (Category::Shopping, "&tbm=shop".to_string()),
    ])
}
