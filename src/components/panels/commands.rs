//! Commands panel: searchable kubectl reference table

use super::SearchBox;
use crate::action::Action;
use crate::component::Component;
use crate::model::content::CommandEntry;
use crate::model::filter::filter_indices;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub struct CommandsView {
    commands: Vec<CommandEntry>,
    visible: Vec<usize>,
    table_state: TableState,
    search: SearchBox,
    theme: Theme,
}

impl CommandsView {
    pub fn new(commands: Vec<CommandEntry>, theme: Theme) -> Self {
        let mut view = Self {
            commands,
            visible: Vec::new(),
            table_state: TableState::default(),
            search: SearchBox::default(),
            theme,
        };
        view.refilter();
        view
    }

    pub fn selected_command(&self) -> Option<&CommandEntry> {
        self.table_state
            .selected()
            .and_then(|pos| self.visible.get(pos))
            .and_then(|&idx| self.commands.get(idx))
    }

    fn refilter(&mut self) {
        self.visible = filter_indices(&self.commands, self.search.query());
        self.table_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(self.visible.len() - 1);
        self.table_state.select(Some(next));
    }

    fn has_categories(&self) -> bool {
        self.commands.iter().any(|c| c.category.is_some())
    }
}

impl Component for CommandsView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search.is_editing() {
            return Ok(self.search.handle_key(key));
        }
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('y') | KeyCode::Enter => self
                .selected_command()
                .map(|entry| Action::Copy(entry.command.clone())),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Esc if !self.search.query().is_empty() => Some(Action::ClearSearch),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::NextItem),
            MouseEventKind::ScrollUp => Some(Action::PrevItem),
            _ => None,
        })
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if self.search.apply(&action) {
            self.refilter();
            return Ok(None);
        }
        match action {
            Action::NextItem | Action::ScrollDown => self.move_selection(1),
            Action::PrevItem | Action::ScrollUp => self.move_selection(-1),
            Action::PageDown => self.move_selection(10),
            Action::PageUp => self.move_selection(-10),
            Action::FirstItem => self.move_selection(isize::MIN),
            Action::LastItem => self.move_selection(isize::MAX),
            _ => {}
        }
        Ok(None)
    }

    fn captures_input(&self) -> bool {
        self.search.is_editing()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(" Commands ")
            .title_bottom(Span::styled(
                " y copy  / search ",
                Style::default().fg(theme.muted()),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(
            Paragraph::new(self.search.line(theme, self.visible.len(), self.commands.len())),
            chunks[0],
        );

        let with_category = self.has_categories();
        let header_style = Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD);
        let mut header = vec![Cell::from("Command"), Cell::from("Description")];
        if with_category {
            header.push(Cell::from("Category"));
        }

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&idx| self.commands.get(idx))
            .map(|entry| {
                let mut cells = vec![
                    Cell::from(Span::styled(
                        entry.command.clone(),
                        Style::default().fg(theme.highlight()),
                    )),
                    Cell::from(Span::styled(
                        entry.description.clone(),
                        Style::default().fg(theme.text()),
                    )),
                ];
                if with_category {
                    cells.push(Cell::from(Span::styled(
                        entry.category.clone().unwrap_or_default(),
                        Style::default().fg(theme.muted()),
                    )));
                }
                Row::new(cells)
            })
            .collect();

        let widths: Vec<Constraint> = if with_category {
            vec![
                Constraint::Percentage(42),
                Constraint::Percentage(44),
                Constraint::Percentage(14),
            ]
        } else {
            vec![Constraint::Percentage(45), Constraint::Percentage(55)]
        };

        let table = Table::new(rows, widths)
            .header(Row::new(header).style(header_style).bottom_margin(1))
            .highlight_style(theme.selection())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, chunks[1], &mut self.table_state);
        Ok(())
    }
}
