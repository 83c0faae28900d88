//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::ui::Focus;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations, render results and timers
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to main app
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next item in the focused list
    NextItem,
    /// Move to previous item in the focused list
    PrevItem,
    /// Jump to first item
    FirstItem,
    /// Jump to last item
    LastItem,
    /// Move to next tab of the open module
    NextTab,
    /// Move to previous tab of the open module
    PrevTab,
    /// Jump to a tab by position
    SelectTab(usize),
    /// Open the next module in the catalog
    NextModule,
    /// Open the previous module in the catalog
    PrevModule,
    /// Open a module by catalog position
    OpenModule(usize),
    /// Move keyboard focus between sidebar and panel
    SetFocus(Focus),

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open the module picker
    OpenModulePicker,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Panel widgets
    // ─────────────────────────────────────────────────────────────────────────
    /// Expand or collapse the selected card
    ToggleExpand,
    /// Start or pause the walkthrough timer
    TogglePlay,
    /// Advance the walkthrough one step
    StepForward,
    /// Go back one walkthrough step
    StepBack,
    /// Switch the diagram view between rendered output and raw source
    ToggleSource,
    /// Start a fresh render attempt for the visible diagram
    RemountDiagram,
    /// Copy text to the clipboard
    Copy(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Leave search mode keeping the query
    ExitSearchMode,
    /// Leave search mode and clear the query
    ClearSearch,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::SelectTab(idx) => write!(f, "SelectTab({})", idx),
            Action::NextModule => write!(f, "NextModule"),
            Action::PrevModule => write!(f, "PrevModule"),
            Action::OpenModule(idx) => write!(f, "OpenModule({})", idx),
            Action::SetFocus(focus) => write!(f, "SetFocus({:?})", focus),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::ScrollLeft => write!(f, "ScrollLeft"),
            Action::ScrollRight => write!(f, "ScrollRight"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenModulePicker => write!(f, "OpenModulePicker"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::ToggleExpand => write!(f, "ToggleExpand"),
            Action::TogglePlay => write!(f, "TogglePlay"),
            Action::StepForward => write!(f, "StepForward"),
            Action::StepBack => write!(f, "StepBack"),
            Action::ToggleSource => write!(f, "ToggleSource"),
            Action::RemountDiagram => write!(f, "RemountDiagram"),
            Action::Copy(text) => write!(f, "Copy({} bytes)", text.len()),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
        }
    }
}
