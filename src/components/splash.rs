//! Splash screen component
//!
//! Shows the helm wheel logo briefly before the first module opens.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

const KUBE_BLUE: Color = Color::Rgb(50, 108, 229);

/// Splash screen component
pub struct SplashComponent {
    start_time: Option<Instant>,
    /// Time before auto-advancing
    duration: Duration,
}

impl Default for SplashComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashComponent {
    pub fn new() -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1500),
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    fn logo() -> &'static [&'static str] {
        &[
            "            ##            ",
            "      ##    ##    ##      ",
            "       ##   ##   ##       ",
            "        ############      ",
            "  ##   ##    ##    ##   ##",
            "   ######    @@    ###### ",
            "  ##   ##    ##    ##   ##",
            "        ############      ",
            "       ##   ##   ##       ",
            "      ##    ##    ##      ",
            "            ##            ",
        ]
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key skips the splash
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default(), area);

        let logo = Self::logo();
        let logo_height = logo.len() as u16;
        let logo_width = logo.first().map(|l| l.len()).unwrap_or(0) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(area.height.saturating_sub(logo_height + 5) / 2),
                Constraint::Length(logo_height),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let logo_lines: Vec<Line> = logo
            .iter()
            .map(|line| {
                let spans: Vec<Span> = line
                    .chars()
                    .map(|c| match c {
                        '#' => Span::styled("█", Style::default().fg(KUBE_BLUE)),
                        '@' => Span::styled("█", Style::default().fg(Color::White)),
                        _ => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let logo_x = area.x + area.width.saturating_sub(logo_width) / 2;
        let logo_rect = Rect::new(logo_x, chunks[1].y, logo_width.min(area.width), logo_height);
        frame.render_widget(Paragraph::new(logo_lines), logo_rect);

        let title = Line::from(vec![
            Span::styled(
                "kube",
                Style::default().fg(KUBE_BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "-tutor",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(title), chunks[3]);

        let subtitle = Line::from(Span::styled(
            "Learn Kubernetes in your terminal",
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(subtitle), chunks[4]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_not_complete_before_init() {
        let splash = SplashComponent::new();
        assert!(!splash.is_complete());
    }

    #[test]
    fn test_any_key_skips() {
        let mut splash = SplashComponent::new();
        let action = splash
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
        assert_eq!(action, Some(Action::SplashComplete));
        let action = splash
            .handle_key_event(KeyEvent::from(KeyCode::Char('q')))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }

    #[test]
    fn test_draws_title() {
        let mut splash = SplashComponent::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| {
                splash.draw(f, f.area()).unwrap();
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("kube-tutor"));
    }
}
