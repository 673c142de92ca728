use crate::config::SelectorConfig;
use crate::error::ConfigError;
use crate::page::{Category, ElementId, Link, PageModel};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Builds a page snapshot from a results page's HTML.
///
/// Result links are taken in document order and get ids `0..N`; tab and
/// pagination anchors are numbered after them. Relative hrefs are resolved
/// against `page_url`.
pub fn extract(
    html: &str,
    page_url: &Url,
    selectors: &SelectorConfig,
) -> Result<PageModel, ConfigError> {
    let doc = Html::parse_document(html);
    let mut counter = 0;
    let mut next_id = || {
        let id = ElementId(counter);
        counter += 1;
        id
    };

    let link_selector = selector(&selectors.links)?;
    let links = doc
        .select(&link_selector)
        .filter_map(|e| to_link(e, page_url, &mut next_id))
        .collect::<Vec<Link>>();

    ::log::debug!("Extracted {} result links from {}", links.len(), page_url);

    let mut page = PageModel::new(links);

    let tab_selector = selector(&selectors.tabs)?;
    let tab_anchors: Vec<ElementRef> = doc.select(&tab_selector).collect();
    for category in Category::ALL {
        let Some(marker) = selectors.tab_markers.get(&category) else {
            continue;
        };
        let anchor = tab_anchors
            .iter()
            .find(|e| e.value().attr("href").is_some_and(|h| h.contains(marker.as_str())));
        if let Some(link) = anchor.and_then(|e| to_link(*e, page_url, &mut next_id)) {
            ::log::trace!("Found {} tab: {}", category, link.href);
            page = page.with_tab(category, link);
        }
    }

    // The "all results" view is the search URL up to its first extra parameter
    if !selectors.tab_markers.contains_key(&Category::All) {
        let all_href = page_url.as_str().split('&').next().unwrap_or_default();
        page = page.with_tab(Category::All, Link::new(next_id(), all_href, "All"));
    }

    if let Some(link) = select_first(&doc, &selectors.next_page, page_url, &mut next_id)? {
        page = page.with_next_page(link);
    }
    if let Some(link) = select_first(&doc, &selectors.prev_page, page_url, &mut next_id)? {
        page = page.with_prev_page(link);
    }

    Ok(page)
}

fn selector(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|_| ConfigError::InvalidSelector(css.to_string()))
}

fn select_first(
    doc: &Html,
    css: &str,
    page_url: &Url,
    next_id: &mut impl FnMut() -> ElementId,
) -> Result<Option<Link>, ConfigError> {
    let sel = selector(css)?;
    Ok(doc
        .select(&sel)
        .next()
        .and_then(|e| to_link(e, page_url, next_id)))
}

/// Anchors without an href, or with one that doesn't resolve, are skipped
fn to_link(
    element: ElementRef,
    page_url: &Url,
    next_id: &mut impl FnMut() -> ElementId,
) -> Option<Link> {
    let href = element.value().attr("href")?;
    let resolved = match page_url.join(href) {
        Ok(url) => url,
        Err(e) => {
            ::log::debug!("Skipping unresolvable href '{}': {}", href, e);
            return None;
        }
    };

    let text = element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Some(Link::new(next_id(), resolved.as_str(), text))
}
