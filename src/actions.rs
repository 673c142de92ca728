use crate::env::{KeyEvent, PageEnvironment};
use crate::error::NavError;
use crate::focus::FocusController;
use crate::page::{Category, Link, PageModel};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Keyboard-triggered actions bound by the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    OpenLink,
    OpenLinkNewTab,
    NextLink,
    PreviousLink,
    NextPage,
    PreviousPage,
    JumpToSearch,
    NavigateTab(Category),
}

/// What a handler invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    /// Guarded out because the search field has keyboard focus
    Suppressed,
    /// Nothing to act on (missing anchor, empty page, detached link)
    NoOp,
}

impl Action {
    /// Every action, in registration order
    pub const ALL: [Action; 13] = [
        Action::NextLink,
        Action::PreviousLink,
        Action::OpenLink,
        Action::OpenLinkNewTab,
        Action::NextPage,
        Action::PreviousPage,
        Action::JumpToSearch,
        Action::NavigateTab(Category::All),
        Action::NavigateTab(Category::Images),
        Action::NavigateTab(Category::Videos),
        Action::NavigateTab(Category::Maps),
        Action::NavigateTab(Category::News),
        Action::NavigateTab(Category::Shopping),
    ];

    /// Human-readable name shown in shortcut listings
    pub fn name(&self) -> String {
        match self {
            Action::OpenLink => "Open link".to_string(),
            Action::OpenLinkNewTab => "Open link in new tab".to_string(),
            Action::NextLink => "Next link".to_string(),
            Action::PreviousLink => "Previous link".to_string(),
            Action::NextPage => "Next page".to_string(),
            Action::PreviousPage => "Previous page".to_string(),
            Action::JumpToSearch => "Jump to search input".to_string(),
            Action::NavigateTab(category) => format!("Navigate to {} tab", category),
        }
    }

    /// Key used for this action in the `shortcuts` config table
    pub fn config_key(&self) -> &'static str {
        match self {
            Action::OpenLink => "openLink",
            Action::OpenLinkNewTab => "openLinkNewTab",
            Action::NextLink => "nextLink",
            Action::PreviousLink => "previousLink",
            Action::NextPage => "nextPage",
            Action::PreviousPage => "previousPage",
            Action::JumpToSearch => "highlightSearchInput",
            Action::NavigateTab(Category::All) => "navigateAllTab",
            Action::NavigateTab(Category::Images) => "navigateImagesTab",
            Action::NavigateTab(Category::Videos) => "navigateVideosTab",
            Action::NavigateTab(Category::Maps) => "navigateMapsTab",
            Action::NavigateTab(Category::News) => "navigateNewsTab",
            Action::NavigateTab(Category::Shopping) => "navigateShoppingTab",
        }
    }

    pub fn default_chord(&self) -> &'static str {
        match self {
            Action::NextLink => "alt+j",
            Action::PreviousLink => "alt+k",
            Action::OpenLink => "alt+enter",
            Action::OpenLinkNewTab => "command+enter",
            Action::NextPage => "alt+l",
            Action::PreviousPage => "alt+h",
            Action::JumpToSearch => "command+/",
            Action::NavigateTab(Category::All) => "alt+a",
            Action::NavigateTab(Category::Images) => "alt+i",
            Action::NavigateTab(Category::Videos) => "alt+v",
            Action::NavigateTab(Category::Maps) => "alt+m",
            Action::NavigateTab(Category::News) => "alt+n",
            Action::NavigateTab(Category::Shopping) => "alt+s",
        }
    }

    /// Run the handler body for this action.
    ///
    /// Every action is a no-op while the search field has keyboard focus, so
    /// typing in the search box never triggers navigation.
    pub fn run(
        self,
        event: &mut KeyEvent,
        focus: &mut FocusController,
        page: &PageModel,
        env: &mut dyn PageEnvironment,
    ) -> Outcome {
        if env.search_input_focused() {
            ::log::debug!("{}: search input focused, ignoring {}", self, event.chord);
            return Outcome::Suppressed;
        }

        match self.perform(event, focus, page, env) {
            Ok(true) => Outcome::Applied,
            Ok(false) => Outcome::NoOp,
            Err(NavError::MissingTarget(target)) => {
                ::log::debug!("{}: no {} anchor on this page", self, target);
                Outcome::NoOp
            }
            Err(e) => {
                ::log::warn!("{}: {}", self, e);
                Outcome::NoOp
            }
        }
    }

    fn perform(
        self,
        event: &mut KeyEvent,
        focus: &mut FocusController,
        page: &PageModel,
        env: &mut dyn PageEnvironment,
    ) -> Result<bool, NavError> {
        match self {
            Action::OpenLink => match focused_link(focus, page) {
                Some(link) => {
                    env.set_location(&link.href);
                    Ok(true)
                }
                None => Ok(false),
            },
            Action::OpenLinkNewTab => match focused_link(focus, page) {
                Some(link) => {
                    env.open_background_tab(&link.href);
                    Ok(true)
                }
                None => Ok(false),
            },
            Action::NextLink => move_focus(focus, page, env, 1),
            Action::PreviousLink => move_focus(focus, page, env, -1),
            Action::NextPage => navigate(env, page.next_page_anchor(), "next page"),
            Action::PreviousPage => navigate(env, page.prev_page_anchor(), "previous page"),
            Action::JumpToSearch => {
                env.focus_search_input();
                event.prevent_default();
                event.stop_propagation();
                Ok(true)
            }
            Action::NavigateTab(category) => {
                navigate(env, page.tab_anchor(category), &format!("{} tab", category))
            }
        }
    }
}

fn focused_link<'a>(focus: &FocusController, page: &'a PageModel) -> Option<&'a Link> {
    page.link_at(focus.current_index()).ok()
}

fn move_focus(
    focus: &mut FocusController,
    page: &PageModel,
    env: &mut dyn PageEnvironment,
    delta: isize,
) -> Result<bool, NavError> {
    if page.link_count() == 0 {
        return Ok(false);
    }
    focus.move_focus(page, env, delta)?;
    Ok(true)
}

/// Point the active tab at `anchor`; an absent anchor is reported as `MissingTarget`
fn navigate(
    env: &mut dyn PageEnvironment,
    anchor: Option<&Link>,
    target: &str,
) -> Result<bool, NavError> {
    let link = anchor.ok_or_else(|| NavError::MissingTarget(target.to_string()))?;
    env.set_location(&link.href);
    Ok(true)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parse a `shortcuts` config key such as `nextLink`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.config_key() == s)
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}
