//! Module picker dialog
//!
//! Two-panel layout:
//! - Left panel: modules matching the typed filter
//! - Right panel: summary of the highlighted module

use crate::action::Action;
use crate::component::Component;
use crate::model::content::Module;
use crate::model::filter::filter_indices;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Snapshot of a module for the picker
#[derive(Debug, Clone)]
struct PickerRow {
    module: Module,
    visited: bool,
}

/// Module picker dialog
#[derive(Default)]
pub struct ModulePickerDialog {
    rows: Vec<PickerRow>,
    query: String,
    /// Catalog indices matching the query
    visible: Vec<usize>,
    list_state: ListState,
    theme: Theme,
}

impl ModulePickerDialog {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Reset the picker for a fresh opening
    pub fn open(&mut self, modules: &[Module], visited: &[bool], current: usize) {
        self.rows = modules
            .iter()
            .zip(visited.iter().copied().chain(std::iter::repeat(false)))
            .map(|(module, visited)| PickerRow {
                module: module.clone(),
                visited,
            })
            .collect();
        self.query.clear();
        self.refilter();
        let position = self.visible.iter().position(|&idx| idx == current);
        self.list_state.select(position.or(if self.visible.is_empty() { None } else { Some(0) }));
    }

    /// Catalog index of the highlighted module
    pub fn selected_module(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|pos| self.visible.get(pos).copied())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn refilter(&mut self) {
        let modules: Vec<Module> = self.rows.iter().map(|r| r.module.clone()).collect();
        self.visible = filter_indices(&modules, &self.query);
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn select_next(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            if pos + 1 < self.visible.len() {
                self.list_state.select(Some(pos + 1));
            }
        }
    }

    fn select_prev(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            self.list_state.select(Some(pos.saturating_sub(1)));
        }
    }
}

impl Component for ModulePickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter if self.selected_module().is_some() => Some(Action::ConfirmModal),
            KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Tab => Some(Action::ModalDown),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => self.select_prev(),
            Action::ModalDown => self.select_next(),
            Action::SearchInput(c) => {
                self.query.push(c);
                self.refilter();
            }
            Action::SearchBackspace => {
                self.query.pop();
                self.refilter();
            }
            Action::ConfirmModal => return Ok(self.selected_module().map(Action::OpenModule)),
            _ => {}
        }
        Ok(None)
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.theme;
        let popup_width = 90u16.min(area.width.saturating_sub(4));
        let popup_height = 22u16.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(popup_width) / 2;
        let y = area.y + area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filter
                Constraint::Min(3),    // Lists
                Constraint::Length(1), // Hints
            ])
            .split(popup_area);

        let filter = Paragraph::new(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(theme.muted())),
            Span::styled(self.query.clone(), Style::default().fg(theme.text())),
            Span::styled("█", Style::default().fg(theme.accent())),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Open Module ")
                .title_style(
                    Style::default()
                        .fg(theme.accent())
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(theme.focused_border()),
        );
        frame.render_widget(filter, main_chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[1]);

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&idx| self.rows.get(idx).map(|row| (idx, row)))
            .map(|(idx, row)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if row.visited { "✓ " } else { "  " },
                        Style::default().fg(theme.success()),
                    ),
                    Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(theme.muted())),
                    Span::raw(row.module.title.clone()),
                ]))
            })
            .collect();

        let list_title = format!(" {} of {} ", self.visible.len(), self.rows.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(list_title)
                    .border_style(theme.border()),
            )
            .highlight_style(theme.selection())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, content_chunks[0], &mut self.list_state);

        let detail = match self.selected_module().and_then(|idx| self.rows.get(idx)) {
            Some(row) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        row.module.title.clone(),
                        Style::default()
                            .fg(theme.accent())
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(row.module.summary.clone()),
                    Line::from(""),
                ];
                let tabs: Vec<&str> = row.module.tabs.iter().map(|t| t.title.as_str()).collect();
                lines.push(Line::from(Span::styled(
                    format!("Tabs: {}", tabs.join(" · ")),
                    Style::default().fg(theme.muted()),
                )));
                lines
            }
            None => vec![Line::from(Span::styled(
                "No module matches the filter",
                Style::default().fg(theme.muted()),
            ))],
        };
        frame.render_widget(
            Paragraph::new(detail)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Summary ")
                        .border_style(theme.border()),
                ),
            content_chunks[1],
        );

        let hints = Line::from(vec![
            Span::styled(" ↑↓", Style::default().fg(theme.highlight())),
            Span::raw(" move  "),
            Span::styled("Enter", Style::default().fg(theme.highlight())),
            Span::raw(" open  "),
            Span::styled("Esc", Style::default().fg(theme.highlight())),
            Span::raw(" close"),
        ]);
        frame.render_widget(Paragraph::new(hints), main_chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::{OverviewPanel, Panel, Tab};

    fn module(id: &str, title: &str, summary: &str) -> Module {
        Module {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            default_tab: "overview".to_string(),
            tabs: vec![Tab {
                id: "overview".to_string(),
                title: "Overview".to_string(),
                panel: Panel::Overview(OverviewPanel {
                    paragraphs: vec!["text".to_string()],
                    key_points: Vec::new(),
                }),
            }],
        }
    }

    fn picker() -> ModulePickerDialog {
        let modules = vec![
            module("workloads", "Workloads", "Deployments and ReplicaSets"),
            module("networking", "Networking", "Services and DNS"),
            module("storage", "Storage", "Volumes and claims"),
        ];
        let mut picker = ModulePickerDialog::new(Theme::Dark);
        picker.open(&modules, &[true, false, false], 1);
        picker
    }

    #[test]
    fn test_opens_on_current_module() {
        assert_eq!(picker().selected_module(), Some(1));
    }

    #[test]
    fn test_filter_narrows_and_resets_selection() {
        let mut picker = picker();
        for c in "vol".chars() {
            picker.update(Action::SearchInput(c)).unwrap();
        }
        assert_eq!(picker.query(), "vol");
        assert_eq!(picker.selected_module(), Some(2));

        picker.update(Action::SearchInput('z')).unwrap();
        assert_eq!(picker.selected_module(), None);
        assert_eq!(
            picker.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap(),
            None
        );
    }

    #[test]
    fn test_confirm_opens_selected_module() {
        let mut picker = picker();
        picker.update(Action::ModalDown).unwrap();
        let action = picker.update(Action::ConfirmModal).unwrap();
        assert_eq!(action, Some(Action::OpenModule(2)));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut picker = picker();
        picker.update(Action::ModalDown).unwrap();
        picker.update(Action::ModalDown).unwrap();
        assert_eq!(picker.selected_module(), Some(2));
        for _ in 0..5 {
            picker.update(Action::ModalUp).unwrap();
        }
        assert_eq!(picker.selected_module(), Some(0));
    }
}
