use crate::config::SelectorConfig;
use crate::error::ConfigError;
use crate::page::{Category, ElementId};
use crate::parsers::parse_page;

const RESULTS_PAGE: &str = r#"<html><body>
<form><input id="lst-ib" name="q" value="rust"></form>
<div id="hdtb">
  <a class="q qs" href="/search?q=rust&tbm=isch">Images</a>
  <a class="q qs" href="/search?q=rust&tbm=nws">News</a>
  <a class="q qs" href="https://maps.google.com/maps?q=rust">Maps</a>
  <a class="q" href="/search?q=rust&tbm=vid">Videos (not a tab anchor)</a>
</div>
<div class="g"><h3 class="r"><a href="https://www.rust-lang.org/">Rust   Programming
  Language</a></h3></div>
<div class="g"><h3 class="r"><a href="/url?q=https://doc.rust-lang.org/">Docs</a></h3></div>
<div class="g"><h3 class="r"><a>No href</a></h3></div>
<div class="g"><h3 class="r"><a href="https://crates.io/">crates.io</a></h3></div>
<a id="pnnext" href="/search?q=rust&start=10">Next</a>
</body></html>"#;

const PAGE_URL: &str = "https://www.google.com/search?q=rust&start=0&hl=en";

#[test]
fn test_result_links_in_document_order() {
    let page = parse_page(RESULTS_PAGE, PAGE_URL, &SelectorConfig::default()).unwrap();

    assert_eq!(page.link_count(), 3);
    let hrefs: Vec<&str> = page.links().iter().map(|l| l.href.as_str()).collect();
    assert_eq!(
        hrefs,
        vec![
            "https://www.rust-lang.org/",
            "https://www.google.com/url?q=https://doc.rust-lang.org/",
            "https://crates.io/",
        ]
    );
    assert_eq!(page.link_at(0).unwrap().text, "Rust Programming Language");

    let ids: Vec<ElementId> = page.links().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![ElementId(0), ElementId(1), ElementId(2)]);
}

#[test]
fn test_category_tabs() {
    let page = parse_page(RESULTS_PAGE, PAGE_URL, &SelectorConfig::default()).unwrap();

    assert_eq!(
        page.tab_anchor(Category::Images).map(|l| l.href.as_str()),
        Some("https://www.google.com/search?q=rust&tbm=isch")
    );
    assert_eq!(
        page.tab_anchor(Category::News).map(|l| l.href.as_str()),
        Some("https://www.google.com/search?q=rust&tbm=nws")
    );
    assert_eq!(
        page.tab_anchor(Category::Maps).map(|l| l.href.as_str()),
        Some("https://maps.google.com/maps?q=rust")
    );
    assert!(page.tab_anchor(Category::Videos).is_none());
    assert!(page.tab_anchor(Category::Shopping).is_none());
}

#[test]
fn test_all_tab_derived_from_page_url() {
    let page = parse_page(RESULTS_PAGE, PAGE_URL, &SelectorConfig::default()).unwrap();

    assert_eq!(
        page.tab_anchor(Category::All).map(|l| l.href.as_str()),
        Some("https://www.google.com/search?q=rust")
    );
}

#[test]
fn test_pagination_anchors() {
    let page = parse_page(RESULTS_PAGE, PAGE_URL, &SelectorConfig::default()).unwrap();

    assert_eq!(
        page.next_page_anchor().map(|l| l.href.as_str()),
        Some("https://www.google.com/search?q=rust&start=10")
    );
    assert!(page.prev_page_anchor().is_none());
}

#[test]
fn test_anchor_ids_follow_result_links() {
    let page = parse_page(RESULTS_PAGE, PAGE_URL, &SelectorConfig::default()).unwrap();

    let mut anchor_ids: Vec<ElementId> = Category::ALL
        .iter()
        .filter_map(|c| page.tab_anchor(*c))
        .chain(page.next_page_anchor())
        .map(|l| l.id)
        .collect();
    anchor_ids.sort();
    anchor_ids.dedup();

    assert_eq!(anchor_ids.len(), 5);
    assert!(anchor_ids.iter().all(|id| id.0 >= page.link_count()));
}

#[test]
fn test_page_without_results() {
    let html = "<html><body><p>Your search did not match any documents.</p></body></html>";
    let page = parse_page(html, "https://www.google.com/search?q=zzzz", &SelectorConfig::default())
        .unwrap();

    assert_eq!(page.link_count(), 0);
    assert!(page.next_page_anchor().is_none());
    assert!(page.tab_anchor(Category::Images).is_none());
    assert!(page.tab_anchor(Category::All).is_some());
}

#[test]
fn test_custom_selectors() {
    let html = r#"<html><body>
        <ol class="results"><li><a href="/a">A</a></li><li><a href="/b">B</a></li></ol>
        <a rel="next" href="/page/2">More</a>
    </body></html>"#;
    let selectors = SelectorConfig {
        links: "ol.results a".to_string(),
        next_page: "a[rel=next]".to_string(),
        ..SelectorConfig::default()
    };
    let page = parse_page(html, "https://search.example/q?x=1", &selectors).unwrap();

    assert_eq!(page.link_count(), 2);
    assert_eq!(page.link_at(1).unwrap().href, "https://search.example/b");
    assert_eq!(
        page.next_page_anchor().map(|l| l.href.as_str()),
        Some("https://search.example/page/2")
    );
}

#[test]
fn test_invalid_inputs() {
    let selectors = SelectorConfig {
        links: "h3[".to_string(),
        ..SelectorConfig::default()
    };
    assert!(matches!(
        parse_page(RESULTS_PAGE, PAGE_URL, &selectors),
        Err(ConfigError::InvalidSelector(_))
    ));

    assert!(matches!(
        parse_page(RESULTS_PAGE, "not a url", &SelectorConfig::default()),
        Err(ConfigError::InvalidUrl(_))
    ));
}
