//! Terminal diagram engine
//!
//! - `parser` - flowchart source to IR
//! - `layout` - layered placement and edge routing
//! - `render` - glyph canvas to role-tagged markup
//! - `engine` - the configurable engine boundary
//! - `renderer` - per-view render attempts with stale-result protection

pub mod engine;
pub mod error;
pub mod layout;
pub mod parser;
pub mod render;
pub mod renderer;

pub use engine::{EngineConfig, EngineHandle};
pub use render::{GlyphMode, Markup, Role};
pub use renderer::{DiagramRenderer, RenderOutcome};
