//! Diagram engine boundary
//!
//! A [`DiagramEngine`] is configured once with an [`EngineConfig`] and then
//! asked to validate and render source text keyed by a unique render id.
//! The application builds a single [`EngineHandle`] at startup and hands
//! clones of it to every renderer.

use super::error::{DiagramError, DiagramResult};
use super::parser::parse_flowchart;
use super::render::{render_flowchart, GlyphMode, GlyphPalette, Markup};
use super::renderer::RenderId;
use crate::theme::Theme;
use std::sync::{Arc, OnceLock};

/// Appearance settings applied to the engine once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub glyphs: GlyphMode,
    pub theme: Theme,
}

/// Something that turns diagram source into markup
pub trait DiagramEngine: Send + Sync {
    /// Apply configuration. Returns `false` when the engine was already
    /// configured, in which case the call has no effect.
    fn configure(&self, config: &EngineConfig) -> bool;

    /// Check that the source parses
    fn validate(&self, source: &str) -> DiagramResult<()>;

    /// Render the source for one render attempt
    fn render(&self, id: &RenderId, source: &str) -> DiagramResult<Markup>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in flowchart engine
// ═══════════════════════════════════════════════════════════════════════════════

/// Engine for `flowchart` / `graph` diagrams
#[derive(Debug, Default)]
pub struct FlowchartEngine {
    config: OnceLock<EngineConfig>,
}

impl FlowchartEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active configuration, or defaults if `configure` was never called
    pub fn config(&self) -> EngineConfig {
        self.config.get().copied().unwrap_or_default()
    }
}

impl DiagramEngine for FlowchartEngine {
    fn configure(&self, config: &EngineConfig) -> bool {
        self.config.set(*config).is_ok()
    }

    fn validate(&self, source: &str) -> DiagramResult<()> {
        parse_flowchart(source).map(|_| ())
    }

    fn render(&self, id: &RenderId, source: &str) -> DiagramResult<Markup> {
        let config = self.config();
        let chart = parse_flowchart(source)?;
        tracing::debug!(
            "Rendering {} ({} nodes, {} edges)",
            id,
            chart.nodes.len(),
            chart.edges.len()
        );
        let markup = render_flowchart(&chart, &GlyphPalette::new(config.glyphs), config.theme)?;
        if markup.is_empty() {
            return Err(DiagramError::Render(String::new()));
        }
        Ok(markup)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Shared handle
// ═══════════════════════════════════════════════════════════════════════════════

/// Configured engine shared by every renderer
#[derive(Clone)]
pub struct EngineHandle {
    engine: Arc<dyn DiagramEngine>,
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle").finish_non_exhaustive()
    }
}

impl EngineHandle {
    /// Configure the engine and wrap it for sharing
    pub fn initialize(engine: Arc<dyn DiagramEngine>, config: EngineConfig) -> Self {
        if engine.configure(&config) {
            tracing::info!(
                "Diagram engine configured (glyphs: {:?}, theme: {:?})",
                config.glyphs,
                config.theme
            );
        } else {
            tracing::debug!("Diagram engine already configured, keeping existing settings");
        }
        Self { engine }
    }

    /// Built-in flowchart engine with the given configuration
    pub fn flowchart(config: EngineConfig) -> Self {
        Self::initialize(Arc::new(FlowchartEngine::new()), config)
    }

    pub fn engine(&self) -> &Arc<dyn DiagramEngine> {
        &self.engine
    }
}
