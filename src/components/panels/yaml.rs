//! YAML panel: example manifests with highlighting and copy

use super::{clamp_scroll, wrap_text, SearchBox};
use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::components::yaml_highlight::highlight_yaml;
use crate::model::content::YamlExample;
use crate::model::filter::filter_indices;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct YamlView {
    examples: Vec<YamlExample>,
    visible: Vec<usize>,
    list_state: ListState,
    /// Scroll of the manifest pane
    scroll: usize,
    page: usize,
    search: SearchBox,
    theme: Theme,
}

impl YamlView {
    pub fn new(examples: Vec<YamlExample>, theme: Theme) -> Self {
        let mut view = Self {
            examples,
            visible: Vec::new(),
            list_state: ListState::default(),
            scroll: 0,
            page: 10,
            search: SearchBox::default(),
            theme,
        };
        view.refilter();
        view
    }

    pub fn selected_example(&self) -> Option<&YamlExample> {
        self.list_state
            .selected()
            .and_then(|pos| self.visible.get(pos))
            .and_then(|&idx| self.examples.get(idx))
    }

    fn refilter(&mut self) {
        self.visible = filter_indices(&self.examples, self.search.query());
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
        self.scroll = 0;
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(self.visible.len() - 1);
        if Some(next) != self.list_state.selected() {
            self.list_state.select(Some(next));
            self.scroll = 0;
        }
    }
}

impl Component for YamlView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search.is_editing() {
            return Ok(self.search.handle_key(key));
        }
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Char('J') => Some(Action::ScrollDown),
            KeyCode::Char('K') => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('y') => self
                .selected_example()
                .map(|example| Action::Copy(example.yaml.clone())),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Esc if !self.search.query().is_empty() => Some(Action::ClearSearch),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            _ => None,
        })
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if self.search.apply(&action) {
            self.refilter();
            return Ok(None);
        }
        match action {
            Action::NextItem => self.move_selection(1),
            Action::PrevItem => self.move_selection(-1),
            Action::FirstItem => self.move_selection(isize::MIN),
            Action::LastItem => self.move_selection(isize::MAX),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::PageDown => self.scroll = self.scroll.saturating_add(self.page),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page),
            _ => {}
        }
        Ok(None)
    }

    fn captures_input(&self) -> bool {
        self.search.is_editing()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.theme;
        let (list_area, detail_area) = split_list_detail(area, 32);

        // Left: search line + example list
        let list_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(" Examples ");
        let list_inner = list_block.inner(list_area);
        frame.render_widget(list_block, list_area);
        let list_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(list_inner);
        frame.render_widget(
            Paragraph::new(self.search.line(theme, self.visible.len(), self.examples.len())),
            list_chunks[0],
        );

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&idx| self.examples.get(idx))
            .map(|example| ListItem::new(example.title.clone()))
            .collect();
        let list = List::new(items)
            .highlight_style(theme.selection())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, list_chunks[1], &mut self.list_state);

        // Right: description + manifest
        let Some(example) = self.selected_example().cloned() else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "No example matches the search",
                    Style::default().fg(theme.muted()),
                ))
                .block(Block::default().borders(Borders::ALL).border_style(theme.border())),
                detail_area,
            );
            return Ok(());
        };

        let detail_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Line::from(vec![
                Span::styled(
                    format!(" {} ", example.title),
                    Style::default()
                        .fg(theme.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("y copy ", Style::default().fg(theme.muted())),
            ]));
        let detail_inner = detail_block.inner(detail_area);
        frame.render_widget(detail_block, detail_area);

        let description_rows = wrap_text(example.description.trim(), usize::from(detail_inner.width));
        let description_height = description_rows.len().min(4) as u16;
        let description = Paragraph::new(description_rows.join("\n"))
            .style(Style::default().fg(theme.muted()));
        let detail_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(description_height),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(detail_inner);
        frame.render_widget(description, detail_chunks[0]);

        let lines = highlight_yaml(&example.yaml, theme);
        let visible_height = usize::from(detail_chunks[2].height);
        self.page = visible_height.max(1);
        self.scroll = clamp_scroll(self.scroll, lines.len(), visible_height);
        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll.min(u16::MAX as usize) as u16, 0)),
            detail_chunks[2],
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    const DEPLOYMENT: &str = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 3\n";

    fn view() -> YamlView {
        YamlView::new(
            vec![
                YamlExample {
                    title: "Deployment".to_string(),
                    description: "Three replicas of a web server".to_string(),
                    yaml: DEPLOYMENT.to_string(),
                },
                YamlExample {
                    title: "Service".to_string(),
                    description: "ClusterIP in front of the web pods".to_string(),
                    yaml: "apiVersion: v1\nkind: Service\n".to_string(),
                },
            ],
            Theme::Dark,
        )
    }

    #[test]
    fn test_y_copies_selected_manifest() {
        let mut view = view();
        let action = view.handle_key_event(KeyEvent::from(KeyCode::Char('y'))).unwrap();
        assert_eq!(action, Some(Action::Copy(DEPLOYMENT.to_string())));

        view.update(Action::NextItem).unwrap();
        let action = view.handle_key_event(KeyEvent::from(KeyCode::Char('y'))).unwrap();
        assert!(matches!(action, Some(Action::Copy(text)) if text.contains("kind: Service")));
    }

    #[test]
    fn test_search_by_description() {
        let mut view = view();
        view.update(Action::EnterSearchMode).unwrap();
        for c in "clusterip".chars() {
            view.update(Action::SearchInput(c)).unwrap();
        }
        assert_eq!(view.selected_example().map(|e| e.title.as_str()), Some("Service"));
    }

    #[test]
    fn test_changing_example_resets_scroll() {
        let mut view = view();
        view.update(Action::ScrollDown).unwrap();
        assert_eq!(view.scroll, 1);
        view.update(Action::NextItem).unwrap();
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_draws_highlighted_manifest() {
        let mut view = view();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| view.draw(f, f.area()).unwrap()).unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("kind: Deployment"));
        assert!(content.contains("replicas: 3"));
        assert!(content.contains("Examples"));
    }
}
