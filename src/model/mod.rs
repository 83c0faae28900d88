//! Model layer - lesson content and application state
//!
//! - `content` - module schema deserialized from YAML
//! - `filter` - search over concepts, commands and examples
//! - `walkthrough` - step player and its interval timer
//! - `progress` - visited modules, persisted between sessions
//! - `ModalStack` - modal overlay management

pub mod content;
pub mod filter;
pub mod modal;
pub mod progress;
pub mod ui;
pub mod walkthrough;

// Re-export commonly used types
pub use content::{Module, Panel};
pub use modal::{Modal, ModalStack};
pub use progress::Progress;
pub use ui::{AppMode, Focus, StatusMessage};
