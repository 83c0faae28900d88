//! Services behind the UI
//!
//! - Lesson catalog embedded in the binary
//! - Clipboard access through the terminal

pub mod catalog;
pub mod clipboard;

pub use catalog::Catalog;
pub use clipboard::Clipboard;
