//! Component trait - Interface for UI components
//!
//! Panels, dialogs and screens share this lifecycle. Components never touch
//! each other directly; they talk through [`Action`]s routed by the App.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

/// Trait for UI components
///
/// 1. `handle_key_event` / `handle_mouse_event` turn input into Actions
/// 2. `update` applies an Action and may emit a follow-up
/// 3. `tick` advances anything driven by time or background work
/// 4. `draw` renders the current state
pub trait Component {
    /// Called once after construction
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key press to an Action without changing state
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Apply an Action, optionally returning a follow-up Action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Poll timers and finished background work
    ///
    /// Returns true when something visible changed.
    fn tick(&mut self, now: Instant) -> bool {
        let _ = now;
        false
    }

    /// Whether the component is capturing raw text input (search box)
    fn captures_input(&self) -> bool {
        false
    }

    /// Render into `area`. Must not change lesson state.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
