//! Diagram error types

use thiserror::Error;

/// Message shown when an engine error carries no text of its own
pub const GENERIC_RENDER_FAILURE: &str = "Unable to render diagram";

/// Result type alias for the diagram engine
pub type DiagramResult<T> = std::result::Result<T, DiagramError>;

/// Everything that can go wrong between diagram source and markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    // ─────────────────────────────────────────────────────────────
    // Syntax Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Diagram source is empty")]
    Empty,

    #[error("Unknown diagram type '{found}' (expected 'flowchart' or 'graph')")]
    UnknownDiagramType { found: String },

    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Line {line}: subgraph '{name}' is never closed with 'end'")]
    UnclosedSubgraph { line: usize, name: String },

    // ─────────────────────────────────────────────────────────────
    // Render Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Diagram too large to render ({width}x{height} cells)")]
    TooLarge { width: usize, height: usize },

    #[error("{0}")]
    Render(String),

    #[error("Diagram engine panicked: {0}")]
    Panicked(String),
}

impl DiagramError {
    /// Build a syntax error for a 1-based source line
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        DiagramError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Source line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            DiagramError::Syntax { line, .. } | DiagramError::UnclosedSubgraph { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }

    /// Message suitable for the failure banner
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_RENDER_FAILURE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_reports_line() {
        let err = DiagramError::syntax(3, "expected node after link");
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.to_string(), "Line 3: expected node after link");
    }

    #[test]
    fn test_empty_render_message_falls_back() {
        let err = DiagramError::Render(String::new());
        assert_eq!(err.user_message(), GENERIC_RENDER_FAILURE);

        let err = DiagramError::Render("boom".to_string());
        assert_eq!(err.user_message(), "boom");
    }
}
