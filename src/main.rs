use clap::Parser;
use serde::Serialize;
use serp_nav::actions::Outcome;
use serp_nav::chord::KeyChord;
use serp_nav::config::NavigatorConfig;
use serp_nav::env::KeyEvent;
use serp_nav::simulated::{PageEffect, SimulatedPage};
use serp_nav::{build_plugin, fetch, parsers};
use std::error::Error;

mod args;
use args::{Args, SourceArg};

/// Result of replaying one key chord
#[derive(Debug, Serialize)]
struct Step {
    chord: String,
    action: Option<String>,
    outcome: Option<Outcome>,
    index: usize,
    default_prevented: bool,
    effects: Vec<PageEffect>,
}

#[derive(Debug, Serialize)]
struct Replay {
    plugin: String,
    page_url: String,
    active: bool,
    links: usize,
    setup: Vec<PageEffect>,
    steps: Vec<Step>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from file: {}", path);
            NavigatorConfig::from_file(path)?
        }
        None => NavigatorConfig::default(),
    }
    .with_env_overrides();

    let plugin = build_plugin(&config)?;

    if args.list_shortcuts {
        for shortcut in plugin.shortcuts() {
            println!("{:<16} {}", shortcut.chord.to_string(), shortcut.name);
        }
        return Ok(());
    }

    let chords = args
        .keys
        .iter()
        .map(|k| k.parse::<KeyChord>().map_err(|e| format!("'{}': {}", k, e)))
        .collect::<Result<Vec<_>, _>>()?;

    let (html, page_url) = match args.source_type {
        SourceArg::File => (std::fs::read_to_string(&args.source)?, args.page_url.clone()),
        SourceArg::Web => {
            ::log::info!("Loading {} through WebDriver at {}", args.source, config.webdriver_url);
            fetch::fetch_page(&config.webdriver_url, &args.source).await?
        }
    };

    let active = plugin.is_active(&page_url);
    if !active && !args.force {
        ::log::warn!(
            "{} is not active on {} (use --force to replay anyway)",
            plugin.name(),
            page_url
        );
    }

    let page = parsers::parse_page(&html, &page_url, &config.selectors)?;
    let links = page.link_count();
    let env = SimulatedPage::with_uniform_layout(
        &page,
        args.viewport_height,
        args.first_top,
        args.row_height,
    )
    .with_location(page_url.clone());

    let mut replay = Replay {
        plugin: plugin.name().to_string(),
        page_url,
        active,
        links,
        setup: Vec::new(),
        steps: Vec::new(),
    };

    if active || args.force {
        let mut session = plugin.attach(page, env);
        replay.setup = session.env_mut().take_transcript();

        for chord in chords {
            let mut event = KeyEvent::new(chord.clone());
            let handled = session.handle_key(&mut event);
            replay.steps.push(Step {
                chord: chord.to_string(),
                action: handled.map(|(action, _)| action.name()),
                outcome: handled.map(|(_, outcome)| outcome),
                index: session.state().index,
                default_prevented: event.default_prevented(),
                effects: session.env_mut().take_transcript(),
            });
        }
    }

    println!("{}", serde_json::to_string_pretty(&replay)?);
    Ok(())
}
