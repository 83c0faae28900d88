//! Walkthrough panel: step-through demo with an auto-advance timer

use super::wrap_text;
use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::model::content::WalkthroughPanel;
use crate::model::walkthrough::StepPlayer;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

pub struct WalkthroughView {
    panel: WalkthroughPanel,
    player: StepPlayer,
    list_state: ListState,
    theme: Theme,
}

impl WalkthroughView {
    pub fn new(panel: WalkthroughPanel, interval: Duration, theme: Theme) -> Self {
        let player = StepPlayer::new(panel.steps.len(), interval);
        let mut list_state = ListState::default();
        if !panel.steps.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            panel,
            player,
            list_state,
            theme,
        }
    }

    /// Stop the timer for good
    pub fn unmount(&mut self) {
        self.player.unmount();
    }

    fn sync_list(&mut self) {
        if !self.player.is_empty() {
            self.list_state.select(Some(self.player.current()));
        }
    }

    fn step_items(&self) -> Vec<ListItem<'static>> {
        let theme = self.theme;
        let current = self.player.current();
        self.panel
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| {
                let (marker, style) = if idx < current {
                    ("✓", Style::default().fg(theme.success()))
                } else if idx == current {
                    ("●", Style::default().fg(theme.highlight()))
                } else {
                    ("○", Style::default().fg(theme.muted()))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", marker), style),
                    Span::styled(format!("{}. ", idx + 1), Style::default().fg(theme.muted())),
                    Span::raw(step.title.clone()),
                ]))
            })
            .collect()
    }

    fn detail_lines(&self, width: usize) -> Vec<Line<'static>> {
        let theme = self.theme;
        let Some(step) = self.panel.steps.get(self.player.current()) else {
            return Vec::new();
        };
        let mut lines = vec![
            Line::from(Span::styled(
                step.title.clone(),
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for row in wrap_text(step.detail.trim(), width) {
            lines.push(Line::from(Span::styled(row, Style::default().fg(theme.text()))));
        }
        if let Some(command) = &step.command {
            lines.push(Line::from(""));
            for command_line in command.trim().lines() {
                lines.push(Line::from(vec![
                    Span::styled("$ ", Style::default().fg(theme.muted())),
                    Span::styled(
                        command_line.to_string(),
                        Style::default().fg(theme.highlight()),
                    ),
                ]));
            }
        }
        lines
    }

    fn status_line(&self) -> Line<'static> {
        let theme = self.theme;
        let (icon, label) = if self.player.is_playing() {
            ("▶", "Playing")
        } else {
            ("⏸", "Paused")
        };
        let dots: String = (0..self.player.len())
            .map(|idx| if idx == self.player.current() { '●' } else { '·' })
            .collect();
        Line::from(vec![
            Span::styled(
                format!(" {} {} ", icon, label),
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " Step {}/{} ",
                    self.player.current() + 1,
                    self.player.len()
                ),
                Style::default().fg(theme.text()),
            ),
            Span::styled(dots, Style::default().fg(theme.accent())),
            Span::styled(
                "   Space play/pause  ←/→ step",
                Style::default().fg(theme.muted()),
            ),
        ])
    }
}

impl Component for WalkthroughView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char(' ') => Some(Action::TogglePlay),
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('j') | KeyCode::Down => {
                Some(Action::StepForward)
            }
            KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('k') | KeyCode::Up => {
                Some(Action::StepBack)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Char('y') => self
                .panel
                .steps
                .get(self.player.current())
                .and_then(|step| step.command.clone())
                .map(Action::Copy),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::TogglePlay => self.player.toggle(Instant::now()),
            Action::StepForward | Action::NextItem => self.player.next(),
            Action::StepBack | Action::PrevItem => self.player.prev(),
            Action::FirstItem => self.player.select(0),
            Action::LastItem => self.player.select(self.player.len().saturating_sub(1)),
            _ => return Ok(None),
        }
        self.sync_list();
        Ok(None)
    }

    fn tick(&mut self, now: Instant) -> bool {
        let changed = self.player.tick(now);
        if changed {
            self.sync_list();
        }
        changed
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.theme;
        let intro_rows = self
            .panel
            .intro
            .as_deref()
            .map(|intro| wrap_text(intro.trim(), usize::from(area.width.saturating_sub(2))))
            .unwrap_or_default();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(intro_rows.len().min(4) as u16),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        if !intro_rows.is_empty() {
            let intro: Vec<Line> = intro_rows
                .into_iter()
                .map(|row| Line::from(Span::styled(format!(" {}", row), Style::default().fg(theme.muted()))))
                .collect();
            frame.render_widget(Paragraph::new(intro), chunks[0]);
        }

        let (list_area, detail_area) = split_list_detail(chunks[1], 34);
        let list = List::new(self.step_items())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border())
                    .title(" Steps "),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        let detail_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border());
        let detail_width = usize::from(detail_block.inner(detail_area).width);
        frame.render_widget(
            Paragraph::new(self.detail_lines(detail_width)).block(detail_block),
            detail_area,
        );

        frame.render_widget(Paragraph::new(self.status_line()), chunks[2]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::WalkthroughStep;
    use ratatui::{backend::TestBackend, Terminal};

    fn view() -> WalkthroughView {
        let step = |title: &str, command: Option<&str>| WalkthroughStep {
            title: title.to_string(),
            detail: format!("{} happens here.", title),
            command: command.map(str::to_string),
        };
        WalkthroughView::new(
            WalkthroughPanel {
                intro: Some("What happens when you run kubectl apply".to_string()),
                steps: vec![
                    step("kubectl sends the manifest", Some("kubectl apply -f web.yaml")),
                    step("API server validates and stores", None),
                    step("Scheduler binds the Pod", None),
                ],
            },
            Duration::from_millis(100),
            Theme::Dark,
        )
    }

    #[test]
    fn test_arrow_keys_step() {
        let mut view = view();
        let forward = view.handle_key_event(KeyEvent::from(KeyCode::Right)).unwrap();
        assert_eq!(forward, Some(Action::StepForward));
        view.update(Action::StepForward).unwrap();
        assert_eq!(view.player.current(), 1);
        view.update(Action::StepBack).unwrap();
        view.update(Action::StepBack).unwrap();
        assert_eq!(view.player.current(), 2);
    }

    #[test]
    fn test_play_advances_on_tick() {
        let mut view = view();
        view.update(Action::TogglePlay).unwrap();
        assert!(view.player.is_playing());

        let later = Instant::now() + Duration::from_millis(250);
        assert!(view.tick(later));
        assert_eq!(view.player.current(), 2);

        view.update(Action::TogglePlay).unwrap();
        assert!(!view.player.is_playing());
    }

    #[test]
    fn test_unmount_stops_timer() {
        let mut view = view();
        view.update(Action::TogglePlay).unwrap();
        view.unmount();
        assert!(!view.player.is_playing());
        assert!(!view.tick(Instant::now() + Duration::from_secs(5)));
        view.update(Action::StepForward).unwrap();
        assert_eq!(view.player.current(), 0);
    }

    #[test]
    fn test_copy_step_command() {
        let mut view = view();
        let action = view.handle_key_event(KeyEvent::from(KeyCode::Char('y'))).unwrap();
        assert_eq!(action, Some(Action::Copy("kubectl apply -f web.yaml".to_string())));
        view.update(Action::StepForward).unwrap();
        assert_eq!(view.handle_key_event(KeyEvent::from(KeyCode::Char('y'))).unwrap(), None);
    }

    #[test]
    fn test_draws_current_step() {
        let mut view = view();
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal.draw(|f| view.draw(f, f.area()).unwrap()).unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Step 1/3"));
        assert!(content.contains("Paused"));
        assert!(content.contains("$ kubectl apply -f web.yaml"));
    }
}
