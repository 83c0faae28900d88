//! Generic module view
//!
//! Renders any lesson module: header, tab bar and the panel of the active
//! tab. Only the active tab's panel is mounted.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::split_module_view;
use crate::components::panels::{MountContext, PanelView};
use crate::model::content::Module;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::time::Instant;

pub struct ModuleView {
    module: Module,
    active_tab: usize,
    panel: Option<PanelView>,
    ctx: MountContext,
    focused: bool,
}

impl ModuleView {
    /// Open a module on the given tab, falling back to its default tab
    pub fn new(module: Module, tab: Option<usize>, ctx: MountContext) -> Self {
        let active_tab = tab
            .filter(|&idx| idx < module.tabs.len())
            .unwrap_or_else(|| module.default_tab_index());
        let panel = module
            .tabs
            .get(active_tab)
            .map(|t| PanelView::mount(&t.panel, &ctx));
        tracing::info!("Opened module '{}' on tab {}", module.id, active_tab);
        Self {
            module,
            active_tab,
            panel,
            ctx,
            focused: true,
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn active_tab_id(&self) -> &str {
        self.module
            .tabs
            .get(self.active_tab)
            .map(|t| t.id.as_str())
            .unwrap_or_default()
    }

    pub fn panel(&self) -> Option<&PanelView> {
        self.panel.as_ref()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Switch tabs, unmounting the old panel. Returns true if the tab changed.
    pub fn select_tab(&mut self, index: usize) -> bool {
        if index == self.active_tab || index >= self.module.tabs.len() {
            return false;
        }
        self.unmount();
        self.active_tab = index;
        self.panel = self
            .module
            .tabs
            .get(index)
            .map(|t| PanelView::mount(&t.panel, &self.ctx));
        true
    }

    /// Tear down the mounted panel
    pub fn unmount(&mut self) {
        if let Some(mut panel) = self.panel.take() {
            panel.unmount();
        }
    }

    fn tab_count(&self) -> usize {
        self.module.tabs.len()
    }
}

impl Component for ModuleView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.captures_input() {
            return match self.panel.as_mut() {
                Some(panel) => panel.handle_key_event(key),
                None => Ok(None),
            };
        }
        match key.code {
            KeyCode::Tab => return Ok(Some(Action::NextTab)),
            KeyCode::BackTab => return Ok(Some(Action::PrevTab)),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < self.tab_count() {
                    return Ok(Some(Action::SelectTab(idx)));
                }
                return Ok(None);
            }
            _ => {}
        }
        match self.panel.as_mut() {
            Some(panel) => panel.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match self.panel.as_mut() {
            Some(panel) => panel.handle_mouse_event(mouse),
            None => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let count = self.tab_count();
        match action {
            Action::NextTab if count > 0 => {
                self.select_tab((self.active_tab + 1) % count);
                Ok(None)
            }
            Action::PrevTab if count > 0 => {
                self.select_tab((self.active_tab + count - 1) % count);
                Ok(None)
            }
            Action::SelectTab(idx) => {
                self.select_tab(idx);
                Ok(None)
            }
            other => match self.panel.as_mut() {
                Some(panel) => panel.update(other),
                None => Ok(None),
            },
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.panel.as_mut().is_some_and(|panel| panel.tick(now))
    }

    fn captures_input(&self) -> bool {
        self.panel.as_ref().is_some_and(|panel| panel.captures_input())
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let theme = self.ctx.theme;
        let (header_area, tabs_area, panel_area) = split_module_view(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                format!(" {}", self.module.title),
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", self.module.summary),
                Style::default().fg(theme.muted()),
            )),
        ])
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.border()));
        frame.render_widget(header, header_area);

        let titles: Vec<Line> = self
            .module
            .tabs
            .iter()
            .enumerate()
            .map(|(idx, tab)| Line::from(format!("{} {}", idx + 1, tab.title)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active_tab)
            .style(Style::default().fg(theme.muted()))
            .highlight_style(
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        if let Some(panel) = self.panel.as_mut() {
            panel.draw(frame, panel_area)?;
        }

        if !self.focused {
            // Dim hint that keys go to the sidebar
            let hint = Span::styled(" l to focus ", Style::default().fg(theme.muted()));
            let width = hint.width() as u16;
            if tabs_area.width > width {
                frame.render_widget(
                    Paragraph::new(hint),
                    Rect::new(tabs_area.right() - width, tabs_area.y, width, 1),
                );
            }
        }
        Ok(())
    }
}
