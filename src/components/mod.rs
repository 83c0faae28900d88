//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod layout;
pub mod module_picker;
pub mod module_view;
pub mod panels;
pub mod quit_dialog;
pub mod sidebar;
pub mod splash;
pub mod yaml_highlight;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use module_picker::ModulePickerDialog;
pub use module_view::ModuleView;
pub use panels::{MountContext, PanelView};
pub use quit_dialog::QuitDialog;
pub use sidebar::{SidebarComponent, SidebarEntry};
pub use splash::SplashComponent;
