//! Keyboard navigation for search-results pages.
//!
//! A [`Plugin`] built from a [`config::NavigatorConfig`] is attached to one
//! [`PageModel`] snapshot and a [`env::PageEnvironment`], producing a
//! [`plugin::Session`]. Key chords dispatched into the session move the
//! focused result, open it, paginate, switch category tabs or jump to the
//! search box.

pub mod actions;
pub mod chord;
pub mod config;
pub mod env;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod focus;
pub mod page;
pub mod parsers;
pub mod plugin;
pub mod simulated;

// Re-export commonly used types for convenience
pub use actions::{Action, Outcome};
pub use error::{ConfigError, NavError};
pub use focus::{FocusController, FocusState};
pub use page::{Category, Link, PageModel};
pub use plugin::{Plugin, build_plugin};
