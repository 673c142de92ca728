//! Boundary to the hosting page.
//!
//! Everything the navigator reads from or does to the live document goes
//! through [`PageEnvironment`]. A browser host implements it over the DOM;
//! [`crate::simulated::SimulatedPage`] implements it in memory.

use crate::chord::KeyChord;
use crate::page::Link;
use serde::{Deserialize, Serialize};

/// Current viewport geometry and scroll offsets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Element box relative to the viewport top
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

/// Primitives supplied by the hosting page
pub trait PageEnvironment {
    /// Whether the search text field currently has keyboard focus
    fn search_input_focused(&self) -> bool;

    fn viewport(&self) -> Viewport;

    fn element_rect(&self, link: &Link) -> ElementRect;

    /// Whether `link` still belongs to the live document
    fn is_attached(&self, _link: &Link) -> bool {
        true
    }

    /// Navigate the active tab
    fn set_location(&mut self, url: &str);

    fn open_background_tab(&mut self, url: &str);

    fn add_marker(&mut self, link: &Link, marker: &str);

    fn remove_marker(&mut self, link: &Link, marker: &str);

    /// Give the search field keyboard focus and select its entire text
    fn focus_search_input(&mut self);

    fn scroll_to(&mut self, x: f64, y: f64);
}

/// A key chord delivered by the registry, with its default-handling flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub chord: KeyChord,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    pub fn new(chord: KeyChord) -> Self {
        Self {
            chord,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the browser's default behavior for this chord
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
