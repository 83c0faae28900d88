//! Module list on the left of the main screen

use crate::action::Action;
use crate::component::Component;
use crate::model::ui::Focus;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// One row of the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub title: String,
    pub visited: bool,
    pub tabs_seen: usize,
    pub tab_count: usize,
}

impl SidebarEntry {
    fn marker(&self) -> &'static str {
        if self.tab_count > 0 && self.tabs_seen >= self.tab_count {
            "✓"
        } else if self.visited {
            "•"
        } else {
            " "
        }
    }
}

#[derive(Debug, Default)]
pub struct SidebarComponent {
    entries: Vec<SidebarEntry>,
    list_state: ListState,
    /// Module currently open in the panel
    active: Option<usize>,
    focused: bool,
    theme: Theme,
}

impl SidebarComponent {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Replace the rows, keeping the selection in range
    pub fn set_entries(&mut self, entries: Vec<SidebarEntry>) {
        self.entries = entries;
        match self.list_state.selected() {
            Some(idx) if idx >= self.entries.len() => {
                self.list_state.select(self.entries.len().checked_sub(1));
            }
            None if !self.entries.is_empty() => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    /// Mark the open module and move the cursor onto it
    pub fn set_active(&mut self, index: usize) {
        self.active = Some(index);
        self.list_state.select(Some(index));
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focused = focus == Focus::Sidebar;
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let idx = self.list_state.selected().map_or(0, |i| (i + 1) % self.entries.len());
        self.list_state.select(Some(idx));
    }

    fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len();
        let idx = self.list_state.selected().map_or(0, |i| (i + len - 1) % len);
        self.list_state.select(Some(idx));
    }
}

impl Component for SidebarComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                self.list_state.selected().map(Action::OpenModule)
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => self.next(),
            Action::PrevItem => self.previous(),
            Action::FirstItem if !self.entries.is_empty() => self.list_state.select(Some(0)),
            Action::LastItem => self.list_state.select(self.entries.len().checked_sub(1)),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.theme;
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let is_active = self.active == Some(idx);
                let title_style = if is_active {
                    Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.marker()),
                        Style::default().fg(theme.success()),
                    ),
                    Span::styled(format!("{:>2} ", idx + 1), Style::default().fg(theme.muted())),
                    Span::styled(entry.title.clone(), title_style),
                ]))
            })
            .collect();

        let visited = self.entries.iter().filter(|e| e.visited).count();
        let title = format!(" Modules ({}/{}) ", visited, self.entries.len());
        let border = if self.focused {
            theme.focused_border()
        } else {
            theme.border()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .highlight_style(if self.focused {
                theme.selection()
            } else {
                Style::default().add_modifier(Modifier::REVERSED)
            })
            .highlight_symbol("▶");

        frame.render_stateful_widget(list, area, &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn entries() -> Vec<SidebarEntry> {
        ["Getting Started", "Workloads", "Storage"]
            .iter()
            .enumerate()
            .map(|(i, title)| SidebarEntry {
                title: title.to_string(),
                visited: i == 0,
                tabs_seen: if i == 0 { 6 } else { 0 },
                tab_count: 6,
            })
            .collect()
    }

    #[test]
    fn test_navigation_wraps() {
        let mut sidebar = SidebarComponent::new(Theme::Dark);
        sidebar.set_entries(entries());
        assert_eq!(sidebar.selected(), Some(0));

        sidebar.update(Action::PrevItem).unwrap();
        assert_eq!(sidebar.selected(), Some(2));
        sidebar.update(Action::NextItem).unwrap();
        assert_eq!(sidebar.selected(), Some(0));
        sidebar.update(Action::LastItem).unwrap();
        assert_eq!(sidebar.selected(), Some(2));
    }

    #[test]
    fn test_enter_opens_selected_module() {
        let mut sidebar = SidebarComponent::new(Theme::Dark);
        sidebar.set_entries(entries());
        sidebar.update(Action::NextItem).unwrap();
        let action = sidebar.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::OpenModule(1)));
    }

    #[test]
    fn test_markers() {
        let rows = entries();
        assert_eq!(rows[0].marker(), "✓");
        assert_eq!(rows[1].marker(), " ");
        let partial = SidebarEntry {
            tabs_seen: 2,
            ..rows[0].clone()
        };
        assert_eq!(partial.marker(), "•");
    }

    #[test]
    fn test_draw_lists_modules() {
        let mut sidebar = SidebarComponent::new(Theme::Dark);
        sidebar.set_entries(entries());
        sidebar.set_active(1);

        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal.draw(|f| sidebar.draw(f, f.area()).unwrap()).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Modules (1/3)"));
        assert!(content.contains("Workloads"));
    }
}
