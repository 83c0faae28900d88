//! Diagrams panel
//!
//! One renderer serves the whole panel; choosing another diagram hands it the
//! new source, which starts a fresh attempt. Output is shown as styled text,
//! the raw source on request, or the verbatim source under a warning banner
//! when rendering fails.

use super::clamp_scroll;
use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_list_detail;
use crate::diagram::{DiagramRenderer, EngineHandle, Markup, RenderOutcome, Role};
use crate::model::content::DiagramSpec;
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
use std::time::Instant;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct DiagramsView {
    diagrams: Vec<DiagramSpec>,
    list_state: ListState,
    /// None once unmounted
    renderer: Option<DiagramRenderer>,
    show_source: bool,
    scroll_y: usize,
    scroll_x: usize,
    spinner: usize,
    theme: Theme,
}

impl DiagramsView {
    pub fn new(diagrams: Vec<DiagramSpec>, engine: EngineHandle, theme: Theme) -> Self {
        let renderer = diagrams
            .first()
            .map(|spec| DiagramRenderer::new(engine, &spec.source, spec.title.clone()));
        let mut list_state = ListState::default();
        if !diagrams.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            diagrams,
            list_state,
            renderer,
            show_source: false,
            scroll_y: 0,
            scroll_x: 0,
            spinner: 0,
            theme,
        }
    }

    #[cfg(test)]
    pub fn renderer(&self) -> Option<&DiagramRenderer> {
        self.renderer.as_ref()
    }

    /// Drop the renderer; late worker results go nowhere
    pub fn unmount(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            tracing::debug!("Unmounting diagram renderer {:?}", renderer.instance());
        }
    }

    fn select(&mut self, index: usize) {
        let Some(spec) = self.diagrams.get(index) else {
            return;
        };
        if self.list_state.selected() == Some(index) {
            return;
        }
        self.list_state.select(Some(index));
        self.scroll_x = 0;
        self.scroll_y = 0;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_title(spec.title.clone());
            renderer.set_source(&spec.source);
        }
    }

    fn display_title(&self) -> String {
        let index = self.list_state.selected().unwrap_or(0);
        self.renderer
            .as_ref()
            .and_then(|r| r.title())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Diagram {}", index + 1))
    }

    fn caption(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|idx| self.diagrams.get(idx))
            .and_then(|spec| spec.caption.as_deref())
    }

    fn body_lines(&self) -> Vec<Line<'static>> {
        let theme = self.theme;
        let Some(renderer) = self.renderer.as_ref() else {
            return Vec::new();
        };
        if self.show_source {
            return source_lines(renderer.source(), theme);
        }
        match renderer.outcome() {
            RenderOutcome::Loading => vec![Line::from(Span::styled(
                format!("{} Rendering diagram…", SPINNER[self.spinner % SPINNER.len()]),
                Style::default().fg(theme.muted()),
            ))],
            RenderOutcome::Success(markup) => markup_lines(markup),
            RenderOutcome::Failure { message, source } => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(
                            " ⚠ Diagram could not be rendered ",
                            Style::default()
                                .fg(theme.text())
                                .bg(theme.error())
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" "),
                        Span::styled(message.clone(), Style::default().fg(theme.error())),
                    ]),
                    Line::from(""),
                ];
                lines.extend(source_lines(source, theme));
                lines
            }
        }
    }
}

fn source_lines(source: &str, theme: Theme) -> Vec<Line<'static>> {
    source
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.text()))))
        .collect()
}

/// Style rendered markup by role, using the theme it was rendered for
pub fn markup_lines(markup: &Markup) -> Vec<Line<'static>> {
    let theme = markup.theme;
    markup
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.spans
                    .iter()
                    .map(|span| Span::styled(span.text.clone(), role_style(span.role, theme)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn role_style(role: Role, theme: Theme) -> Style {
    match role {
        Role::Blank => Style::default(),
        Role::Cluster => Style::default().fg(theme.muted()),
        Role::ClusterTitle => Style::default()
            .fg(theme.highlight())
            .add_modifier(Modifier::BOLD),
        Role::Edge => Style::default().fg(theme.muted()),
        Role::Arrow => Style::default().fg(theme.highlight()),
        Role::EdgeLabel => Style::default()
            .fg(theme.text())
            .add_modifier(Modifier::ITALIC),
        Role::NodeBorder => Style::default().fg(theme.accent()),
        Role::NodeLabel => Style::default().fg(theme.text()),
        Role::Emphasis => Style::default()
            .fg(theme.success())
            .add_modifier(Modifier::BOLD),
    }
}

impl Component for DiagramsView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('J') | KeyCode::PageDown => Some(Action::ScrollDown),
            KeyCode::Char('K') | KeyCode::PageUp => Some(Action::ScrollUp),
            KeyCode::Char('H') => Some(Action::ScrollLeft),
            KeyCode::Char('L') => Some(Action::ScrollRight),
            KeyCode::Char('s') => Some(Action::ToggleSource),
            KeyCode::Char('r') => Some(Action::RemountDiagram),
            KeyCode::Char('y') => self
                .renderer
                .as_ref()
                .map(|r| Action::Copy(r.source().to_string())),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollLeft => Some(Action::ScrollLeft),
            MouseEventKind::ScrollRight => Some(Action::ScrollRight),
            _ => None,
        })
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextItem => {
                let next = self.list_state.selected().map_or(0, |i| i + 1);
                self.select(next);
            }
            Action::PrevItem => {
                if let Some(prev) = self.list_state.selected().and_then(|i| i.checked_sub(1)) {
                    self.select(prev);
                }
            }
            Action::ScrollDown => self.scroll_y = self.scroll_y.saturating_add(2),
            Action::ScrollUp => self.scroll_y = self.scroll_y.saturating_sub(2),
            Action::ScrollRight => self.scroll_x = self.scroll_x.saturating_add(4),
            Action::ScrollLeft => self.scroll_x = self.scroll_x.saturating_sub(4),
            Action::ToggleSource => self.show_source = !self.show_source,
            Action::RemountDiagram => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.remount();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn tick(&mut self, _now: Instant) -> bool {
        let Some(renderer) = self.renderer.as_mut() else {
            return false;
        };
        let changed = renderer.poll();
        if renderer.outcome().is_loading() {
            self.spinner = self.spinner.wrapping_add(1);
            return true;
        }
        changed
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.theme;

        let view_area = if self.diagrams.len() > 1 {
            let (list_area, view_area) = split_list_detail(area, 28);
            let items: Vec<ListItem> = self
                .diagrams
                .iter()
                .enumerate()
                .map(|(idx, spec)| {
                    ListItem::new(
                        spec.title
                            .clone()
                            .unwrap_or_else(|| format!("Diagram {}", idx + 1)),
                    )
                })
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(theme.border())
                        .title(" Diagrams "),
                )
                .highlight_style(theme.selection())
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, list_area, &mut self.list_state);
            view_area
        } else {
            area
        };

        let mode = if self.show_source { "source" } else { "rendered" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(
                format!(" {} ", self.display_title()),
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Span::styled(
                format!(" {}  s source  r re-render  HJKL scroll ", mode),
                Style::default().fg(theme.muted()),
            ));
        let inner = block.inner(view_area);
        frame.render_widget(block, view_area);

        let caption = self.caption().map(str::to_string);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(if caption.is_some() { 1 } else { 0 }),
            ])
            .split(inner);

        let lines = self.body_lines();
        let content_width = match self.renderer.as_ref().map(|r| r.outcome()) {
            Some(RenderOutcome::Success(markup)) if !self.show_source => markup.width,
            _ => lines.iter().map(|l| l.width()).max().unwrap_or(0),
        };
        self.scroll_y = clamp_scroll(self.scroll_y, lines.len(), usize::from(chunks[0].height));
        self.scroll_x = clamp_scroll(self.scroll_x, content_width, usize::from(chunks[0].width));
        frame.render_widget(
            Paragraph::new(lines).scroll((
                self.scroll_y.min(u16::MAX as usize) as u16,
                self.scroll_x.min(u16::MAX as usize) as u16,
            )),
            chunks[0],
        );

        if let Some(caption) = caption {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    caption,
                    Style::default()
                        .fg(theme.muted())
                        .add_modifier(Modifier::ITALIC),
                )),
                chunks[1],
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::EngineConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn spec(title: &str, source: &str) -> DiagramSpec {
        DiagramSpec {
            title: Some(title.to_string()),
            caption: None,
            source: source.to_string(),
        }
    }

    fn view(diagrams: Vec<DiagramSpec>) -> DiagramsView {
        DiagramsView::new(diagrams, EngineHandle::flowchart(EngineConfig::default()), Theme::Dark)
    }

    fn settle(view: &mut DiagramsView) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while view
            .renderer()
            .is_some_and(|r| r.outcome().is_loading())
            && Instant::now() < deadline
        {
            view.tick(Instant::now());
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    fn render(view: &mut DiagramsView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
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
    fn test_renders_valid_diagram() {
        let mut view = view(vec![spec("Control plane", "flowchart TB\nA[apiserver]-->B[etcd]")]);
        settle(&mut view);
        assert!(matches!(
            view.renderer().map(|r| r.outcome()),
            Some(RenderOutcome::Success(_))
        ));
        let content = render(&mut view);
        assert!(content.contains("apiserver"));
        assert!(content.contains("Control plane"));
        assert!(!content.contains("could not be rendered"));
    }

    #[test]
    fn test_failure_shows_banner_and_source() {
        let mut view = view(vec![spec("Broken", "flowchart TB\nA-->")]);
        settle(&mut view);
        let content = render(&mut view);
        assert!(content.contains("could not be rendered"));
        assert!(content.contains("flowchart TB"));
        assert!(content.contains("A-->"));
    }

    #[test]
    fn test_selecting_another_diagram_starts_new_attempt() {
        let mut view = view(vec![
            spec("First", "flowchart LR\nA-->B"),
            spec("Second", "flowchart LR\nC-->D"),
        ]);
        settle(&mut view);
        let first = view.renderer().and_then(|r| r.current_id());

        view.update(Action::NextItem).unwrap();
        let renderer = view.renderer().unwrap();
        assert_eq!(renderer.title(), Some("Second"));
        assert!(renderer.outcome().is_loading());
        assert_ne!(renderer.current_id(), first);

        // Past the end is a no-op
        view.update(Action::NextItem).unwrap();
        assert_eq!(view.list_state.selected(), Some(1));
    }

    #[test]
    fn test_toggle_source_and_remount() {
        let mut view = view(vec![spec("Flow", "flowchart TB\nX[kubelet]-->Y[containerd]")]);
        settle(&mut view);
        view.update(Action::ToggleSource).unwrap();
        assert!(view.show_source);
        assert!(render(&mut view).contains("X[kubelet]-->Y[containerd]"));

        let before = view.renderer().and_then(|r| r.current_id());
        view.update(Action::RemountDiagram).unwrap();
        assert_ne!(view.renderer().and_then(|r| r.current_id()), before);
    }

    #[test]
    fn test_narrow_diagram_does_not_scroll_sideways() {
        let mut view = view(vec![spec("Flow", "flowchart LR\nA-->B")]);
        settle(&mut view);
        for _ in 0..10 {
            view.update(Action::ScrollRight).unwrap();
        }
        render(&mut view);
        assert_eq!(view.scroll_x, 0);
    }

    #[test]
    fn test_unmount_drops_renderer() {
        let mut view = view(vec![spec("Flow", "flowchart TB\nA-->B")]);
        view.unmount();
        assert!(view.renderer().is_none());
        assert!(!view.tick(Instant::now()));
        view.update(Action::RemountDiagram).unwrap();
        assert!(view.renderer().is_none());
    }

    #[test]
    fn test_y_copies_source() {
        let mut view = view(vec![spec("Flow", "  flowchart TB\nA-->B  ")]);
        let action = view.handle_key_event(KeyEvent::from(KeyCode::Char('y'))).unwrap();
        assert_eq!(action, Some(Action::Copy("flowchart TB\nA-->B".to_string())));
    }
}
