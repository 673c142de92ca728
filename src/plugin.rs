//! Plugin descriptor and per-page sessions.
//!
//! [`build_plugin`] turns a [`NavigatorConfig`] into a [`Plugin`]: its name,
//! URL filter, initial state and shortcut table. [`Plugin::attach`] binds the
//! plugin to one page snapshot and its environment, producing an independent
//! [`Session`] that key events are dispatched into.

use crate::actions::{Action, Outcome};
use crate::chord::KeyChord;
use crate::config::NavigatorConfig;
use crate::env::{KeyEvent, PageEnvironment};
use crate::error::ConfigError;
use crate::filter::UrlFilter;
use crate::focus::{FocusController, FocusState};
use crate::page::PageModel;
use std::collections::HashMap;

/// A named action bound to a key chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub name: String,
    pub chord: KeyChord,
    pub action: Action,
}

/// Host-side registry that dispatches chords to actions
pub trait ActionRegistry {
    fn register(&mut self, name: &str, chord: KeyChord, action: Action);
}

/// In-memory registry keyed by chord
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    entries: Vec<Shortcut>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, chord: &KeyChord) -> Option<&Shortcut> {
        self.entries.iter().find(|s| &s.chord == chord)
    }

    pub fn entries(&self) -> &[Shortcut] {
        &self.entries
    }
}

impl ActionRegistry for ShortcutTable {
    fn register(&mut self, name: &str, chord: KeyChord, action: Action) {
        // A later registration for the same chord replaces the earlier one
        self.entries.retain(|s| s.chord != chord);
        self.entries.push(Shortcut {
            name: name.to_string(),
            chord,
            action,
        });
    }
}

/// Descriptor handed to the host: name, activation filter, initial state and shortcuts
#[derive(Debug, Clone)]
pub struct Plugin {
    name: String,
    url_filter: UrlFilter,
    initial_state: FocusState,
    highlight_margin: f64,
    highlight_class: String,
    shortcuts: ShortcutTable,
}

/// Build a plugin from configuration.
///
/// Fails on an invalid URL pattern, an unknown action key in the shortcut
/// overrides, an unparsable chord, or two actions bound to the same chord.
pub fn build_plugin(config: &NavigatorConfig) -> Result<Plugin, ConfigError> {
    let url_filter = UrlFilter::new(&config.url_pattern, &config.exclude_patterns)?;

    for key in config.shortcuts.keys() {
        key.parse::<Action>()
            .map_err(|_| ConfigError::UnknownAction(key.clone()))?;
    }

    let mut shortcuts = ShortcutTable::new();
    let mut bound: HashMap<KeyChord, Action> = HashMap::new();
    for action in Action::ALL {
        let raw = config
            .shortcuts
            .get(action.config_key())
            .map(String::as_str)
            .unwrap_or(action.default_chord());
        let chord: KeyChord = raw.parse().map_err(|reason| ConfigError::InvalidChord {
            chord: raw.to_string(),
            reason,
        })?;

        if let Some(other) = bound.insert(chord.clone(), action) {
            return Err(ConfigError::InvalidChord {
                chord: raw.to_string(),
                reason: format!("bound to both '{}' and '{}'", other, action),
            });
        }
        shortcuts.register(&action.name(), chord, action);
    }

    ::log::debug!(
        "Built plugin '{}' with {} shortcuts",
        config.plugin_name,
        shortcuts.entries().len()
    );

    Ok(Plugin {
        name: config.plugin_name.clone(),
        url_filter,
        initial_state: FocusState::default(),
        highlight_margin: config.highlight_margin,
        highlight_class: config.highlight_class.clone(),
        shortcuts,
    })
}

impl Plugin {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the plugin should run on the page at `url`
    pub fn is_active(&self, url: &str) -> bool {
        self.url_filter.matches(url)
    }

    pub fn initial_state(&self) -> FocusState {
        self.initial_state
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        self.shortcuts.entries()
    }

    /// Register every shortcut with a host registry
    pub fn register_into(&self, registry: &mut dyn ActionRegistry) {
        for shortcut in self.shortcuts.entries() {
            registry.register(&shortcut.name, shortcut.chord.clone(), shortcut.action);
        }
    }

    /// Start a session on one page snapshot.
    ///
    /// The first link is highlighted and scrolled into view right away when
    /// the page has any links.
    pub fn attach<E: PageEnvironment>(&self, page: PageModel, mut env: E) -> Session<E> {
        let mut focus = FocusController::new(self.highlight_margin, self.highlight_class.clone());
        focus.set_index(&page, self.initial_state.index);

        if page.link_count() > 0 {
            if let Err(e) = focus.apply_highlight(&page, &mut env, focus.current_index()) {
                ::log::warn!("Could not highlight the first result: {}", e);
            }
        }

        ::log::info!(
            "{} attached to page with {} result links",
            self.name,
            page.link_count()
        );

        Session {
            shortcuts: self.shortcuts.clone(),
            page,
            focus,
            env,
        }
    }
}

/// One plugin instance bound to one page snapshot
#[derive(Debug)]
pub struct Session<E> {
    shortcuts: ShortcutTable,
    page: PageModel,
    focus: FocusController,
    env: E,
}

impl<E: PageEnvironment> Session<E> {
    /// Dispatch a key event; `None` when no shortcut is bound to its chord
    pub fn handle_key(&mut self, event: &mut KeyEvent) -> Option<(Action, Outcome)> {
        let action = self.shortcuts.lookup(&event.chord)?.action;
        Some((action, self.run(action, event)))
    }

    /// Run an action directly, bypassing chord lookup
    pub fn run(&mut self, action: Action, event: &mut KeyEvent) -> Outcome {
        let outcome = action.run(event, &mut self.focus, &self.page, &mut self.env);
        ::log::trace!(
            "{} -> {:?}, focus at {}",
            action,
            outcome,
            self.focus.current_index()
        );
        outcome
    }

    /// Current focus state, as exposed to the registry
    pub fn state(&self) -> FocusState {
        self.focus.state()
    }

    /// Replace the focus index (clamped) and move the highlight with it.
    ///
    /// A detached target leaves index and highlight where they were.
    pub fn set_state(&mut self, state: FocusState) {
        if let Err(e) = self.focus.focus_at(&self.page, &mut self.env, state.index) {
            ::log::warn!("Could not focus result {}: {}", state.index, e);
        }
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn into_env(self) -> E {
        self.env
    }
}
