//! Concepts panel: searchable accordion of concept cards
//!
//! At most one card is expanded. Searching keeps the expanded card open if
//! it still matches.

use super::{wrap_text, SearchBox};
use crate::action::Action;
use crate::component::Component;
use crate::model::content::ConceptCard;
use crate::model::filter::filter_indices;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct ConceptsView {
    cards: Vec<ConceptCard>,
    /// Card indices matching the search
    visible: Vec<usize>,
    /// Card index of the open card
    expanded: Option<usize>,
    list_state: ListState,
    search: SearchBox,
    theme: Theme,
}

impl ConceptsView {
    pub fn new(cards: Vec<ConceptCard>, theme: Theme) -> Self {
        let mut view = Self {
            cards,
            visible: Vec::new(),
            expanded: None,
            list_state: ListState::default(),
            search: SearchBox::default(),
            theme,
        };
        view.refilter();
        view
    }

    /// Card index under the cursor
    pub fn selected_card(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|pos| self.visible.get(pos).copied())
    }

    fn refilter(&mut self) {
        self.visible = filter_indices(&self.cards, self.search.query());
        self.list_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn toggle_selected(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        self.expanded = if self.expanded == Some(card) {
            None
        } else {
            Some(card)
        };
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(next));
    }

    fn card_item(&self, card_idx: usize, width: usize) -> ListItem<'static> {
        let theme = self.theme;
        let Some(card) = self.cards.get(card_idx) else {
            return ListItem::new("");
        };
        let open = self.expanded == Some(card_idx);
        let mut lines = vec![Line::from(vec![
            Span::styled(
                if open { "▾ " } else { "▸ " },
                Style::default().fg(theme.highlight()),
            ),
            Span::styled(
                card.title.clone(),
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ])];
        for row in wrap_text(&card.summary, width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(
                format!("  {}", row),
                Style::default().fg(theme.muted()),
            )));
        }
        if open {
            lines.push(Line::from(""));
            for row in wrap_text(card.body.trim(), width.saturating_sub(4)) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", row),
                    Style::default().fg(theme.text()),
                )));
            }
            lines.push(Line::from(""));
        }
        ListItem::new(Text::from(lines))
    }
}

impl Component for ConceptsView {
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
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleExpand),
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
            Action::PageDown => self.move_selection(5),
            Action::PageUp => self.move_selection(-5),
            Action::FirstItem => self.move_selection(isize::MIN),
            Action::LastItem => self.move_selection(isize::MAX),
            Action::ToggleExpand => self.toggle_selected(),
            _ => {}
        }
        Ok(None)
    }

    fn captures_input(&self) -> bool {
        self.search.is_editing()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(format!(" Concepts ({}) ", self.cards.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(self.search.line(self.theme, self.visible.len(), self.cards.len())),
            chunks[0],
        );

        if self.visible.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " No concepts match the search",
                    Style::default().fg(self.theme.muted()),
                )),
                chunks[1],
            );
            return Ok(());
        }

        let width = usize::from(chunks[1].width.saturating_sub(2));
        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&idx| self.card_item(idx, width))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("│");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn card(title: &str, summary: &str, body: &str) -> ConceptCard {
        ConceptCard {
            title: title.to_string(),
            summary: summary.to_string(),
            body: body.to_string(),
        }
    }

    fn view() -> ConceptsView {
        ConceptsView::new(
            vec![
                card("Pod", "Smallest deployable unit", "Containers share a network namespace."),
                card("Service", "Stable virtual IP for Pods", "Selects Pods by label."),
                card("Namespace", "Virtual cluster partition", "Scopes names and quotas."),
            ],
            Theme::Dark,
        )
    }

    fn render(view: &mut ConceptsView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|f| view.draw(f, f.area()).unwrap()).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_accordion_keeps_one_card_open() {
        let mut view = view();
        view.update(Action::ToggleExpand).unwrap();
        assert_eq!(view.expanded, Some(0));

        view.update(Action::NextItem).unwrap();
        view.update(Action::ToggleExpand).unwrap();
        assert_eq!(view.expanded, Some(1));

        view.update(Action::ToggleExpand).unwrap();
        assert_eq!(view.expanded, None);
    }

    #[test]
    fn test_search_filters_cards() {
        let mut view = view();
        view.update(Action::EnterSearchMode).unwrap();
        assert!(view.captures_input());
        for c in "ip".chars() {
            view.update(Action::SearchInput(c)).unwrap();
        }
        assert_eq!(view.visible, vec![1]);
        assert_eq!(view.selected_card(), Some(1));

        view.update(Action::ClearSearch).unwrap();
        assert_eq!(view.visible.len(), 3);
        assert!(!view.captures_input());
    }

    #[test]
    fn test_typing_while_searching_is_captured() {
        let mut view = view();
        view.update(Action::EnterSearchMode).unwrap();
        let action = view.handle_key_event(KeyEvent::from(KeyCode::Char('j'))).unwrap();
        assert_eq!(action, Some(Action::SearchInput('j')));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut view = view();
        view.update(Action::LastItem).unwrap();
        assert_eq!(view.selected_card(), Some(2));
        view.update(Action::NextItem).unwrap();
        assert_eq!(view.selected_card(), Some(2));
        view.update(Action::FirstItem).unwrap();
        assert_eq!(view.selected_card(), Some(0));
    }

    #[test]
    fn test_expanded_card_shows_body() {
        let mut view = view();
        assert!(!render(&mut view).contains("share a network"));
        view.update(Action::ToggleExpand).unwrap();
        let content = render(&mut view);
        assert!(content.contains("Containers share a network namespace."));
        assert!(content.contains("Stable virtual IP"));
    }
}
