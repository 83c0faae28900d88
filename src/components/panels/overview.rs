//! Overview panel: introductory paragraphs and key points

use super::{clamp_scroll, wrapped_height};
use crate::action::Action;
use crate::component::Component;
use crate::model::content::OverviewPanel;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct OverviewView {
    panel: OverviewPanel,
    scroll: usize,
    /// Last visible height, used for paging
    page: usize,
    theme: Theme,
}

impl OverviewView {
    pub fn new(panel: OverviewPanel, theme: Theme) -> Self {
        Self {
            panel,
            scroll: 0,
            page: 10,
            theme,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for paragraph in &self.panel.paragraphs {
            lines.push(Line::from(Span::styled(
                paragraph.trim().to_string(),
                Style::default().fg(self.theme.text()),
            )));
            lines.push(Line::from(""));
        }

        if !self.panel.key_points.is_empty() {
            lines.push(Line::from(Span::styled(
                "Key points",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            for point in &self.panel.key_points {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(self.theme.highlight())),
                    Span::styled(point.trim().to_string(), Style::default().fg(self.theme.text())),
                ]));
            }
        }
        lines
    }
}

impl Component for OverviewView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
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
        match action {
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::PageDown => self.scroll = self.scroll.saturating_add(self.page),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page),
            Action::FirstItem => self.scroll = 0,
            // Clamped on the next draw
            Action::LastItem => self.scroll = usize::MAX,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(" Overview ");
        let inner = block.inner(area);

        let lines = self.lines();
        let height = wrapped_height(&lines, inner.width);
        self.page = usize::from(inner.height.max(1));
        self.scroll = clamp_scroll(self.scroll, height, usize::from(inner.height));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn view() -> OverviewView {
        OverviewView::new(
            OverviewPanel {
                paragraphs: vec![
                    "Kubernetes schedules containers onto a cluster of machines.".to_string(),
                    "It keeps the actual state matching the desired state.".to_string(),
                ],
                key_points: vec!["Declarative".to_string(), "Self-healing".to_string()],
            },
            Theme::Dark,
        )
    }

    fn render(view: &mut OverviewView, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
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
    fn test_draws_paragraphs_and_key_points() {
        let content = render(&mut view(), 80, 14);
        assert!(content.contains("Kubernetes schedules containers"));
        assert!(content.contains("Key points"));
        assert!(content.contains("Self-healing"));
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut view = view();
        view.update(Action::LastItem).unwrap();
        render(&mut view, 80, 6);
        // 7 content rows in a 4 row viewport
        assert_eq!(view.scroll, 3);

        view.update(Action::FirstItem).unwrap();
        assert_eq!(view.scroll, 0);
        view.update(Action::ScrollUp).unwrap();
        assert_eq!(view.scroll, 0);
    }
}
