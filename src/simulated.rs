//! In-memory page environment.
//!
//! Lays elements out on a vertical document axis, tracks scroll position,
//! markers, keyboard focus and location, and records every side effect in a
//! transcript. Used by the replay CLI and by the tests.

use crate::env::{ElementRect, PageEnvironment, Viewport};
use crate::page::{ElementId, Link, PageModel};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// One observable side effect applied to the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PageEffect {
    SetLocation { url: String },
    OpenTab { url: String },
    AddMarker { element: ElementId, marker: String },
    RemoveMarker { element: ElementId, marker: String },
    FocusSearch { selection: (usize, usize) },
    ScrollTo { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    doc_top: f64,
    height: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedPage {
    viewport_height: f64,
    scroll_x: f64,
    scroll_y: f64,
    placements: HashMap<ElementId, Placement>,
    detached: HashSet<ElementId>,
    markers: HashMap<ElementId, BTreeSet<String>>,
    location: String,
    opened_tabs: Vec<String>,
    search_focused: bool,
    search_text: String,
    search_selection: Option<(usize, usize)>,
    transcript: Vec<PageEffect>,
}

impl SimulatedPage {
    /// Create an empty page with the given viewport height
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            scroll_x: 0.0,
            scroll_y: 0.0,
            placements: HashMap::new(),
            detached: HashSet::new(),
            markers: HashMap::new(),
            location: String::new(),
            opened_tabs: Vec::new(),
            search_focused: false,
            search_text: String::new(),
            search_selection: None,
            transcript: Vec::new(),
        }
    }

    /// Stack every result link of `page` top to bottom, one row each
    pub fn with_uniform_layout(
        page: &PageModel,
        viewport_height: f64,
        first_top: f64,
        row_height: f64,
    ) -> Self {
        let mut sim = Self::new(viewport_height);
        for (i, link) in page.links().iter().enumerate() {
            sim = sim.with_element(link.id, first_top + i as f64 * row_height, row_height);
        }
        sim
    }

    /// Place an element at an absolute document offset
    pub fn with_element(mut self, id: ElementId, doc_top: f64, height: f64) -> Self {
        self.placements.insert(id, Placement { doc_top, height });
        self
    }

    pub fn with_location(mut self, url: impl Into<String>) -> Self {
        self.location = url.into();
        self
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_scroll(mut self, x: f64, y: f64) -> Self {
        self.scroll_x = x;
        self.scroll_y = y;
        self
    }

    pub fn set_search_focused(&mut self, focused: bool) {
        self.search_focused = focused;
    }

    /// Remove an element from the live document
    pub fn detach(&mut self, id: ElementId) {
        self.detached.insert(id);
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn opened_tabs(&self) -> &[String] {
        &self.opened_tabs
    }

    /// Current vertical scroll offset
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn search_selection(&self) -> Option<(usize, usize)> {
        self.search_selection
    }

    /// Elements currently carrying `marker`, in id order
    pub fn marked(&self, marker: &str) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self
            .markers
            .iter()
            .filter(|(_, set)| set.contains(marker))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    pub fn transcript(&self) -> &[PageEffect] {
        &self.transcript
    }

    /// Drain the recorded effects
    pub fn take_transcript(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.transcript)
    }
}

impl PageEnvironment for SimulatedPage {
    fn search_input_focused(&self) -> bool {
        self.search_focused
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            height: self.viewport_height,
            scroll_x: self.scroll_x,
            scroll_y: self.scroll_y,
        }
    }

    fn element_rect(&self, link: &Link) -> ElementRect {
        // Unplaced elements report as detached, so this fallback is never scrolled to
        let placement = self.placements.get(&link.id).copied().unwrap_or(Placement {
            doc_top: self.scroll_y,
            height: 0.0,
        });
        ElementRect {
            top: placement.doc_top - self.scroll_y,
            height: placement.height,
        }
    }

    fn is_attached(&self, link: &Link) -> bool {
        self.placements.contains_key(&link.id) && !self.detached.contains(&link.id)
    }

    fn set_location(&mut self, url: &str) {
        self.location = url.to_string();
        self.transcript.push(PageEffect::SetLocation {
            url: url.to_string(),
        });
    }

    fn open_background_tab(&mut self, url: &str) {
        self.opened_tabs.push(url.to_string());
        self.transcript.push(PageEffect::OpenTab {
            url: url.to_string(),
        });
    }

    fn add_marker(&mut self, link: &Link, marker: &str) {
        if self
            .markers
            .entry(link.id)
            .or_default()
            .insert(marker.to_string())
        {
            self.transcript.push(PageEffect::AddMarker {
                element: link.id,
                marker: marker.to_string(),
            });
        }
    }

    fn remove_marker(&mut self, link: &Link, marker: &str) {
        let removed = self
            .markers
            .get_mut(&link.id)
            .is_some_and(|set| set.remove(marker));
        if removed {
            self.transcript.push(PageEffect::RemoveMarker {
                element: link.id,
                marker: marker.to_string(),
            });
        }
    }

    fn focus_search_input(&mut self) {
        let selection = (0, self.search_text.chars().count());
        self.search_focused = true;
        self.search_selection = Some(selection);
        self.transcript.push(PageEffect::FocusSearch { selection });
    }

    /// Offsets above the document start are clamped to 0, as browsers do
    fn scroll_to(&mut self, x: f64, y: f64) {
        let (x, y) = (x.max(0.0), y.max(0.0));
        self.scroll_x = x;
        self.scroll_y = y;
        self.transcript.push(PageEffect::ScrollTo { x, y });
    }
}
