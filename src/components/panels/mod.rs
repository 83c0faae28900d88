//! Tab panels
//!
//! A module view mounts exactly one panel at a time, built from the tab's
//! content. Switching away unmounts it, which drops diagram renderers and
//! stops walkthrough timers.

pub mod commands;
pub mod concepts;
pub mod diagrams;
pub mod overview;
pub mod walkthrough;
pub mod yaml;

pub use commands::CommandsView;
pub use concepts::ConceptsView;
pub use diagrams::DiagramsView;
pub use overview::OverviewView;
pub use walkthrough::WalkthroughView;
pub use yaml::YamlView;

use crate::action::Action;
use crate::component::Component;
use crate::diagram::EngineHandle;
use crate::model::content::Panel;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Shared services handed to every panel when it is mounted
#[derive(Debug, Clone)]
pub struct MountContext {
    pub engine: EngineHandle,
    pub theme: Theme,
    pub walkthrough_interval: Duration,
}

/// The mounted widget for the active tab
pub enum PanelView {
    Overview(OverviewView),
    Concepts(ConceptsView),
    Yaml(YamlView),
    Commands(CommandsView),
    Diagrams(DiagramsView),
    Walkthrough(WalkthroughView),
}

impl PanelView {
    pub fn mount(panel: &Panel, ctx: &MountContext) -> Self {
        tracing::debug!("Mounting {} panel", panel.kind());
        match panel {
            Panel::Overview(p) => PanelView::Overview(OverviewView::new(p.clone(), ctx.theme)),
            Panel::Concepts(p) => PanelView::Concepts(ConceptsView::new(p.cards.clone(), ctx.theme)),
            Panel::Yaml(p) => PanelView::Yaml(YamlView::new(p.examples.clone(), ctx.theme)),
            Panel::Commands(p) => {
                PanelView::Commands(CommandsView::new(p.commands.clone(), ctx.theme))
            }
            Panel::Diagrams(p) => PanelView::Diagrams(DiagramsView::new(
                p.diagrams.clone(),
                ctx.engine.clone(),
                ctx.theme,
            )),
            Panel::Walkthrough(p) => PanelView::Walkthrough(WalkthroughView::new(
                p.clone(),
                ctx.walkthrough_interval,
                ctx.theme,
            )),
        }
    }

    /// Release timers and renderers before the panel is dropped
    pub fn unmount(&mut self) {
        match self {
            PanelView::Diagrams(view) => view.unmount(),
            PanelView::Walkthrough(view) => view.unmount(),
            _ => {}
        }
    }

    fn component(&mut self) -> &mut dyn Component {
        match self {
            PanelView::Overview(view) => view,
            PanelView::Concepts(view) => view,
            PanelView::Yaml(view) => view,
            PanelView::Commands(view) => view,
            PanelView::Diagrams(view) => view,
            PanelView::Walkthrough(view) => view,
        }
    }
}

impl Component for PanelView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        self.component().handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        self.component().handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.component().update(action)
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.component().tick(now)
    }

    fn captures_input(&self) -> bool {
        match self {
            PanelView::Concepts(view) => view.captures_input(),
            PanelView::Yaml(view) => view.captures_input(),
            PanelView::Commands(view) => view.captures_input(),
            _ => false,
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.component().draw(frame, area)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Search box
// ═══════════════════════════════════════════════════════════════════════════════

/// Query line shared by the searchable panels
#[derive(Debug, Default)]
pub struct SearchBox {
    query: String,
    editing: bool,
}

impl SearchBox {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Keys while the query is being typed
    pub fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::ClearSearch),
            KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        }
    }

    /// Apply a search action, returns true if the query changed
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::EnterSearchMode => {
                self.editing = true;
                false
            }
            Action::ExitSearchMode => {
                self.editing = false;
                false
            }
            Action::ClearSearch => {
                self.editing = false;
                let changed = !self.query.is_empty();
                self.query.clear();
                changed
            }
            Action::SearchInput(c) => {
                self.query.push(*c);
                true
            }
            Action::SearchBackspace => self.query.pop().is_some(),
            _ => false,
        }
    }

    pub fn line(&self, theme: Theme, matches: usize, total: usize) -> Line<'static> {
        if !self.editing && self.query.is_empty() {
            return Line::from(Span::styled(
                " / to search",
                Style::default().fg(theme.muted()),
            ));
        }
        let mut spans = vec![
            Span::styled(" / ", Style::default().fg(theme.highlight())),
            Span::styled(self.query.clone(), Style::default().fg(theme.text())),
        ];
        if self.editing {
            spans.push(Span::styled("█", Style::default().fg(theme.accent())));
        }
        spans.push(Span::styled(
            format!("  ({}/{})", matches, total),
            Style::default().fg(theme.muted()),
        ));
        Line::from(spans)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Text helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Greedy word wrap by display width
///
/// Words longer than the width get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.width()
            } else {
                current.width() + 1 + word.width()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Rows a set of lines takes once wrapped to `width`
pub fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum()
}

/// Clamp a scroll offset so the last page stays filled
pub fn clamp_scroll(offset: usize, content_height: usize, visible_height: usize) -> usize {
    offset.min(content_height.saturating_sub(visible_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("a Pod wraps one or more containers", 12);
        assert_eq!(lines, vec!["a Pod wraps", "one or more", "containers"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines_and_long_words() {
        let lines = wrap_text("first\n\nsupercalifragilistic", 5);
        assert_eq!(lines, vec!["first", "", "supercalifragilistic"]);
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("x".repeat(25)), Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 4);
    }

    #[test]
    fn test_clamp_scroll() {
        assert_eq!(clamp_scroll(50, 30, 10), 20);
        assert_eq!(clamp_scroll(5, 3, 10), 0);
    }

    #[test]
    fn test_search_box_lifecycle() {
        let mut search = SearchBox::default();
        search.apply(&Action::EnterSearchMode);
        assert!(search.is_editing());
        assert!(search.apply(&Action::SearchInput('p')));
        assert!(search.apply(&Action::SearchInput('v')));
        assert_eq!(search.query(), "pv");
        assert!(search.apply(&Action::SearchBackspace));
        search.apply(&Action::ExitSearchMode);
        assert!(!search.is_editing());
        assert_eq!(search.query(), "p");
        assert!(search.apply(&Action::ClearSearch));
        assert_eq!(search.query(), "");
        assert!(!search.apply(&Action::SearchBackspace));
    }

    #[test]
    fn test_search_box_keys() {
        let search = SearchBox::default();
        assert_eq!(
            search.handle_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(Action::SearchInput('q'))
        );
        assert_eq!(
            search.handle_key(KeyEvent::from(KeyCode::Esc)),
            Some(Action::ClearSearch)
        );
    }
}
