//! kube-tutor - An interactive Kubernetes guide in the terminal
//!
//! This is the main entry point for the kube-tutor application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod diagram;
mod logging;
mod model;
mod services;
mod theme;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::Progress;
use crate::services::Catalog;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;

fn main() -> Result<()> {
    // Logging is best effort; the guide works without it
    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    logging::install_panic_hook();

    let config = match Config::load() {
        Some(config) => config,
        None => {
            // First run: write the defaults so they can be edited
            let config = Config::default();
            if let Err(e) = config.save() {
                tracing::warn!("Could not write default config: {:#}", e);
            }
            config
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let catalog = Catalog::load().context("The built-in lesson catalog is invalid")?;
    let progress = Progress::load();

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, catalog, progress, true);
    let result = app.init().and_then(|()| run_app(&mut tui, &mut app));

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("kube-tutor exited with an error: {:#}", err);
        eprintln!("Error: {:?}", err);
        eprintln!("Logs: {}", logging::log_directory().display());
        std::process::exit(1);
    }

    tracing::info!("kube-tutor exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("Draw error: {:#}", e);
            }
        })?;

        // Poll for events; no event within the tick rate means a tick
        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // Process the action; it might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
