use crate::error::ConfigError;
use regex::Regex;
use url::Url;

/// Decides whether the navigator is active on a given page URL
#[derive(Debug, Clone)]
pub struct UrlFilter {
    include_regex: Regex,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from an include pattern and exclusions
    pub fn new(include_pattern: &str, exclude_patterns: &[String]) -> Result<Self, ConfigError> {
        let include_regex = compile(include_pattern)?;

        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(compile(pattern)?);
        }

        Ok(Self {
            include_regex,
            exclude_regexes,
        })
    }

    /// Determine if the plugin should run on `url`
    pub fn matches(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                ::log::debug!("Not a valid page URL '{}': {}", url, e);
                return false;
            }
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }

        let normalized = normalize_url(&parsed);
        let url_str = normalized.as_str();

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|r| r.is_match(url_str)) {
            return false;
        }

        self.include_regex.is_match(url_str)
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Drop the fragment; in-page anchors don't change which page is shown
fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}
