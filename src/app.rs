//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App is intentionally lean - it coordinates between components but
//! does not contain lesson logic itself.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, HelpDialog, ModulePickerDialog, ModuleView, MountContext, PanelView,
    QuitDialog, SidebarComponent, SidebarEntry, SplashComponent,
};
use crate::config::Config;
use crate::diagram::EngineHandle;
use crate::model::{AppMode, Focus, Modal, ModalStack, Progress, StatusMessage};
use crate::services::{Catalog, Clipboard};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Longest clipboard preview shown in the status line
const COPY_PREVIEW_CHARS: usize = 40;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Lesson modules embedded in the binary
    pub catalog: Catalog,

    pub config: Config,

    /// Visited modules, saved after every visit when `persist_progress` is set
    pub progress: Progress,
    persist_progress: bool,

    /// Configured diagram engine shared by every renderer
    engine: EngineHandle,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Which side receives navigation keys
    pub focus: Focus,

    /// Catalog index of the open module
    pub current_module: usize,

    /// Transient status line message and when it was set
    status: Option<(StatusMessage, Instant)>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    clipboard: Clipboard,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub sidebar: SidebarComponent,
    pub module_view: Option<ModuleView>,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub module_picker: ModulePickerDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App and open the starting module
    ///
    /// The starting module is the configured `start_module`, else the module
    /// (and tab) open at the end of the last session, else the first module.
    pub fn new(config: Config, catalog: Catalog, progress: Progress, persist_progress: bool) -> App {
        let engine = EngineHandle::flowchart(config.engine_config());
        let theme = config.theme;

        let mut app = App {
            mode: if config.show_splash {
                AppMode::Splash
            } else {
                AppMode::Running
            },
            catalog,
            config,
            progress,
            persist_progress,
            engine,
            modals: ModalStack::new(),
            focus: Focus::Panel,
            current_module: 0,
            status: None,
            should_quit: false,
            clipboard: Clipboard::from_env(),
            splash: SplashComponent::new(),
            sidebar: SidebarComponent::new(theme),
            module_view: None,
            quit_dialog: QuitDialog::new(theme),
            help_dialog: HelpDialog::new(theme),
            module_picker: ModulePickerDialog::new(theme),
        };

        let (module, tab) = app.starting_point();
        app.refresh_sidebar();
        app.open_module(module, tab);
        app.sidebar.set_focus(app.focus);
        app
    }

    fn starting_point(&self) -> (usize, Option<usize>) {
        if let Some(id) = self.config.start_module.as_deref() {
            match self.catalog.index_of(id) {
                Some(idx) => return (idx, None),
                None => tracing::warn!("Configured start module '{}' does not exist", id),
            }
        }

        let resumed = self.progress.last_module.as_deref().and_then(|id| {
            let idx = self.catalog.index_of(id)?;
            let tab = self
                .progress
                .last_tab
                .as_deref()
                .and_then(|tab_id| self.catalog.get(idx)?.tab_index(tab_id));
            Some((idx, tab))
        });
        resumed.unwrap_or((0, None))
    }

    fn mount_context(&self) -> MountContext {
        MountContext {
            engine: self.engine.clone(),
            theme: self.config.theme,
            walkthrough_interval: self.config.walkthrough_interval(),
        }
    }

    /// Open a module, unmounting the one currently shown
    fn open_module(&mut self, index: usize, tab: Option<usize>) {
        let Some(module) = self.catalog.get(index).cloned() else {
            tracing::warn!("No module at index {}", index);
            return;
        };
        if let Some(mut old) = self.module_view.take() {
            old.unmount();
        }

        let mut view = ModuleView::new(module, tab, self.mount_context());
        view.set_focused(self.focus == Focus::Panel);
        self.module_view = Some(view);
        self.current_module = index;
        self.sidebar.set_active(index);
        self.record_visit();
    }

    /// Remember the open module and tab, saving progress if enabled
    fn record_visit(&mut self) {
        let Some(view) = self.module_view.as_ref() else {
            return;
        };
        let module_id = view.module().id.clone();
        let tab_id = view.active_tab_id().to_string();
        self.progress.record_visit(&module_id, &tab_id, Local::now());

        if self.persist_progress {
            if let Err(e) = self.progress.save() {
                tracing::warn!("Failed to save progress: {:#}", e);
                self.set_status(StatusMessage::Error(format!("Could not save progress: {}", e)));
            }
        }
        self.refresh_sidebar();
    }

    fn refresh_sidebar(&mut self) {
        let entries = self
            .catalog
            .modules()
            .iter()
            .map(|module| SidebarEntry {
                title: module.title.clone(),
                visited: self.progress.is_visited(&module.id),
                tabs_seen: self.progress.tabs_seen(&module.id),
                tab_count: module.tabs.len(),
            })
            .collect();
        self.sidebar.set_entries(entries);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sidebar.set_focus(focus);
        if let Some(view) = self.module_view.as_mut() {
            view.set_focused(focus == Focus::Panel);
        }
    }

    pub fn set_status(&mut self, message: StatusMessage) {
        self.status = Some((message, Instant::now()));
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref().map(|(message, _)| message)
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match self.clipboard.copy(text) {
            Ok(()) => {
                let first_line = text.lines().next().unwrap_or_default().trim();
                let mut preview: String = first_line.chars().take(COPY_PREVIEW_CHARS).collect();
                if first_line.chars().count() > COPY_PREVIEW_CHARS || text.trim().lines().count() > 1 {
                    preview.push('…');
                }
                self.set_status(StatusMessage::Info(format!("Copied: {}", preview)));
            }
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {}", e);
                self.set_status(StatusMessage::Error(format!("Copy failed: {}", e)));
            }
        }
    }

    /// Route an action to the open module, recording tab changes
    fn update_module_view(&mut self, action: Action) -> Result<Option<Action>> {
        let Some(view) = self.module_view.as_mut() else {
            return Ok(None);
        };
        let before = view.active_tab();
        let follow_up = view.update(action)?;
        if view.active_tab() != before {
            self.record_visit();
        }
        Ok(follow_up)
    }

    fn visited_flags(&self) -> Vec<bool> {
        self.catalog
            .modules()
            .iter()
            .map(|m| self.progress.is_visited(&m.id))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().copied() {
                    return self.handle_modal_key_event(modal, key);
                }

                // Search boxes get every key
                if self.focus == Focus::Panel
                    && self.module_view.as_ref().is_some_and(|v| v.captures_input())
                {
                    return match self.module_view.as_mut() {
                        Some(view) => view.handle_key_event(key),
                        None => Ok(None),
                    };
                }

                let global = match key.code {
                    KeyCode::Char('q') => Some(Action::OpenQuitDialog),
                    KeyCode::Char('?') => Some(Action::OpenHelp),
                    KeyCode::Char('m') => Some(Action::OpenModulePicker),
                    KeyCode::Char('[') => Some(Action::PrevModule),
                    KeyCode::Char(']') => Some(Action::NextModule),
                    KeyCode::Char('h') => Some(Action::SetFocus(Focus::Sidebar)),
                    KeyCode::Tab => Some(Action::NextTab),
                    KeyCode::BackTab => Some(Action::PrevTab),
                    _ => None,
                };
                if global.is_some() {
                    return Ok(global);
                }

                match self.focus {
                    Focus::Sidebar => match key.code {
                        KeyCode::Esc => Ok(Some(Action::SetFocus(Focus::Panel))),
                        _ => self.sidebar.handle_key_event(key),
                    },
                    Focus::Panel => match self.module_view.as_mut() {
                        Some(view) => view.handle_key_event(key),
                        None => Ok(None),
                    },
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.mode != AppMode::Running || !self.modals.is_empty() {
            return Ok(None);
        }
        match self.module_view.as_mut() {
            Some(view) => view.handle_mouse_event(mouse),
            None => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash && self.splash.is_complete() {
                    return Ok(Some(Action::SplashComplete));
                }
                let now = Instant::now();
                if self
                    .status
                    .as_ref()
                    .is_some_and(|(_, since)| now.duration_since(*since) >= STATUS_TTL)
                {
                    self.status = None;
                }
                if let Some(view) = self.module_view.as_mut() {
                    view.tick(now);
                }
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Modules
            // ─────────────────────────────────────────────────────────────────
            Action::NextModule => {
                if self.current_module + 1 < self.catalog.len() {
                    self.open_module(self.current_module + 1, None);
                }
            }
            Action::PrevModule => {
                if self.current_module > 0 {
                    self.open_module(self.current_module - 1, None);
                }
            }
            Action::OpenModule(index) => {
                if self.modals.top() == Some(&Modal::ModulePicker) {
                    self.modals.pop();
                }
                if index != self.current_module || self.module_view.is_none() {
                    self.open_module(index, None);
                }
                self.set_focus(Focus::Panel);
            }
            Action::SetFocus(focus) => self.set_focus(focus),

            // ─────────────────────────────────────────────────────────────────
            // Lists (sidebar or panel, by focus)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem | Action::PrevItem | Action::FirstItem | Action::LastItem
                if self.focus == Focus::Sidebar =>
            {
                return self.sidebar.update(action);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenModulePicker => {
                let visited = self.visited_flags();
                self.module_picker
                    .open(self.catalog.modules(), &visited, self.current_module);
                self.modals.push(Modal::ModulePicker);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.top().copied() {
                Some(Modal::QuitConfirm) => self.should_quit = true,
                Some(Modal::ModulePicker) => return self.module_picker.update(Action::ConfirmModal),
                _ => {}
            },
            Action::ModalUp | Action::ModalDown => {
                if self.modals.top() == Some(&Modal::ModulePicker) {
                    self.module_picker.update(action)?;
                }
            }
            Action::SearchInput(_) | Action::SearchBackspace
                if self.modals.top() == Some(&Modal::ModulePicker) =>
            {
                self.module_picker.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Clipboard
            // ─────────────────────────────────────────────────────────────────
            Action::Copy(text) => self.copy_to_clipboard(&text),

            // ─────────────────────────────────────────────────────────────────
            // Tabs, scrolling, search and panel widgets
            // ─────────────────────────────────────────────────────────────────
            other => return self.update_module_view(other),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::Running => {
                let layout = calculate_main_layout(area);

                self.sidebar.draw(frame, layout.sidebar)?;
                match self.module_view.as_mut() {
                    Some(view) => view.draw(frame, layout.content)?,
                    None => frame.render_widget(
                        Paragraph::new(" No module open. Press m to choose one."),
                        layout.content,
                    ),
                }
                self.draw_status_line(frame, layout.status);
                self.draw_help_bar(frame, layout.help);

                // Draw modal overlays bottom to top
                let modals: Vec<Modal> = self.modals.iter().copied().collect();
                for modal in modals {
                    self.draw_modal(frame, area, modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::ModulePicker => self.module_picker.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
            Modal::ModulePicker => self.module_picker.draw(frame, area),
        }
    }

    fn draw_status_line(&self, frame: &mut Frame, area: Rect) {
        let theme = self.config.theme;
        let mut spans = vec![
            Span::styled(
                " kube-tutor ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(50, 108, 229))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if let Some(view) = self.module_view.as_ref() {
            let tab_title = view
                .module()
                .tabs
                .get(view.active_tab())
                .map(|t| t.title.as_str())
                .unwrap_or_default();
            spans.push(Span::styled(
                format!("Module {}/{} ", self.current_module + 1, self.catalog.len()),
                Style::default().fg(theme.muted()),
            ));
            spans.push(Span::styled(
                format!("{} › {}", view.module().title, tab_title),
                Style::default().fg(theme.text()).add_modifier(Modifier::BOLD),
            ));
        }

        let visited = self
            .catalog
            .modules()
            .iter()
            .filter(|m| self.progress.is_visited(&m.id))
            .count();
        spans.push(Span::styled(
            format!("  visited {}/{}", visited, self.catalog.len()),
            Style::default().fg(theme.success()),
        ));

        if let Some(message) = self.status() {
            let color = if message.is_error() {
                theme.error()
            } else {
                theme.highlight()
            };
            spans.push(Span::styled(
                format!("  {} ", message.text()),
                Style::default().fg(color),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let theme = self.config.theme;
        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD),
            )
        };

        let capturing = self.focus == Focus::Panel
            && self.module_view.as_ref().is_some_and(|v| v.captures_input());
        let mut spans = if capturing {
            vec![
                key(" Esc "),
                Span::raw("Clear  "),
                key(" Enter "),
                Span::raw("Keep filter  "),
            ]
        } else {
            vec![
                key(" q "),
                Span::raw("Quit "),
                key(" ? "),
                Span::raw("Help "),
                key(" m "),
                Span::raw("Modules "),
                key(" [ ] "),
                Span::raw("Prev/Next "),
                key(" Tab "),
                Span::raw("Next tab "),
            ]
        };

        if !capturing && self.focus == Focus::Panel {
            let panel_hints: &[(&'static str, &'static str)] =
                match self.module_view.as_ref().and_then(|v| v.panel()) {
                    Some(PanelView::Concepts(_)) => &[(" Enter ", "Expand "), (" / ", "Search ")],
                    Some(PanelView::Yaml(_)) => &[(" y ", "Copy "), (" / ", "Search ")],
                    Some(PanelView::Commands(_)) => &[(" y ", "Copy "), (" / ", "Search ")],
                    Some(PanelView::Diagrams(_)) => &[(" s ", "Source "), (" r ", "Re-render ")],
                    Some(PanelView::Walkthrough(_)) => &[(" Space ", "Play "), (" ←/→ ", "Step ")],
                    _ => &[],
                };
            for &(k, label) in panel_hints {
                spans.push(key(k));
                spans.push(Span::raw(label));
            }
        } else if self.focus == Focus::Sidebar {
            spans.push(key(" Enter "));
            spans.push(Span::raw("Open "));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().fg(theme.muted())),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn config() -> Config {
        Config {
            show_splash: false,
            ..Config::default()
        }
    }

    fn app_with(config: Config, progress: Progress) -> App {
        let catalog = Catalog::load().unwrap();
        App::new(config, catalog, progress, false)
    }

    fn app() -> App {
        app_with(config(), Progress::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app.handle_key_event(KeyEvent::from(code)).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn open_module_id(app: &App) -> &str {
        app.module_view
            .as_ref()
            .map(|v| v.module().id.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn test_starts_on_first_module_and_records_visit() {
        let app = app();
        assert_eq!(app.mode, AppMode::Running);
        assert_eq!(app.current_module, 0);
        assert_eq!(open_module_id(&app), app.catalog.modules()[0].id);
        assert!(app.progress.is_visited(&app.catalog.modules()[0].id));
    }

    #[test]
    fn test_configured_start_module() {
        let config = Config {
            start_module: Some("storage".to_string()),
            ..config()
        };
        let app = app_with(config, Progress::default());
        assert_eq!(open_module_id(&app), "storage");
    }

    #[test]
    fn test_unknown_start_module_falls_back_to_first() {
        let config = Config {
            start_module: Some("no-such-module".to_string()),
            ..config()
        };
        let app = app_with(config, Progress::default());
        assert_eq!(app.current_module, 0);
    }

    #[test]
    fn test_resumes_last_module_and_tab() {
        let mut progress = Progress::default();
        progress.record_visit("networking", "commands", Local::now());
        let app = app_with(config(), progress);
        let view = app.module_view.as_ref().unwrap();
        assert_eq!(view.module().id, "networking");
        assert_eq!(view.active_tab_id(), "commands");
    }

    #[test]
    fn test_bracket_keys_move_between_modules() {
        let mut app = app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.current_module, 1);
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.current_module, 0);
    }

    #[test]
    fn test_tab_change_is_recorded() {
        let mut app = app();
        let id = app.catalog.modules()[0].id.clone();
        let before = app.progress.tabs_seen(&id);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.progress.tabs_seen(&id), before + 1);
    }

    #[test]
    fn test_module_picker_opens_selected_module() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.modals.top(), Some(&Modal::ModulePicker));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.current_module, 2);
        assert_eq!(app.focus, Focus::Panel);
    }

    #[test]
    fn test_picker_filter_gets_typed_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        for c in "storage".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' and 'm' went to the filter, not to the global keys
        assert_eq!(app.modals.top(), Some(&Modal::ModulePicker));
        press(&mut app, KeyCode::Enter);
        assert_eq!(open_module_id(&app), "storage");
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_sidebar_focus_routes_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.sidebar.selected(), Some(2));
        assert_eq!(app.current_module, 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_module, 2);
        assert_eq!(app.focus, Focus::Panel);
    }

    #[test]
    fn test_empty_copy_reports_error() {
        let mut app = app();
        app.update(Action::Copy(String::new())).unwrap();
        assert!(app.status().is_some_and(|s| s.is_error()));
    }

    #[test]
    fn test_status_expires_on_tick() {
        let mut app = app();
        let long_ago = Instant::now().checked_sub(Duration::from_secs(10)).unwrap();
        app.status = Some((StatusMessage::Info("Copied".to_string()), long_ago));
        app.update(Action::Tick).unwrap();
        assert!(app.status().is_none());
    }

    #[test]
    fn test_splash_then_running() {
        let mut app = app_with(Config::default(), Progress::default());
        assert_eq!(app.mode, AppMode::Splash);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Running);
    }

    #[test]
    fn test_draws_main_screen() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.draw(f, f.area()).unwrap()).unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Modules (1/15)"));
        assert!(content.contains(&app.catalog.modules()[0].title));
        assert!(content.contains("visited 1/15"));
    }
}
