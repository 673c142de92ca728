pub mod html;

#[cfg(test)]
mod tests;

use crate::config::SelectorConfig;
use crate::error::ConfigError;
use crate::page::PageModel;
use url::Url;

/// Parse a results page served from `page_url` into a page snapshot
pub fn parse_page(
    html: &str,
    page_url: &str,
    selectors: &SelectorConfig,
) -> Result<PageModel, ConfigError> {
    let url = Url::parse(page_url)?;
    html::extract(html, &url, selectors)
}
