//! Lesson content schema
//!
//! Modules are plain data deserialized from YAML. One generic module view
//! renders any of them; the kind of each tab's panel decides which widget
//! is mounted for it.

use serde::Deserialize;

/// A lesson module: header information plus its tabs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Tab shown when the module is opened
    pub default_tab: String,
    pub tabs: Vec<Tab>,
}

impl Module {
    /// Index of a tab by id
    pub fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    /// Index of the default tab, falling back to the first tab
    pub fn default_tab_index(&self) -> usize {
        self.tab_index(&self.default_tab).unwrap_or(0)
    }

    /// Every diagram in the module with its tab id
    #[cfg(test)]
    pub fn diagrams(&self) -> impl Iterator<Item = (&str, &DiagramSpec)> {
        self.tabs.iter().flat_map(|tab| match &tab.panel {
            Panel::Diagrams(panel) => panel
                .diagrams
                .iter()
                .map(|d| (tab.id.as_str(), d))
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub panel: Panel,
}

/// Panel content, tagged by `kind` in YAML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Panel {
    Overview(OverviewPanel),
    Concepts(ConceptsPanel),
    Yaml(YamlPanel),
    Commands(CommandsPanel),
    Diagrams(DiagramsPanel),
    Walkthrough(WalkthroughPanel),
}

impl Panel {
    pub fn kind(&self) -> &'static str {
        match self {
            Panel::Overview(_) => "overview",
            Panel::Concepts(_) => "concepts",
            Panel::Yaml(_) => "yaml",
            Panel::Commands(_) => "commands",
            Panel::Diagrams(_) => "diagrams",
            Panel::Walkthrough(_) => "walkthrough",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panels
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverviewPanel {
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConceptsPanel {
    pub cards: Vec<ConceptCard>,
}

/// Expandable card: title and summary always visible, body when expanded
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConceptCard {
    pub title: String,
    pub summary: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YamlPanel {
    pub examples: Vec<YamlExample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YamlExample {
    pub title: String,
    pub description: String,
    pub yaml: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandsPanel {
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEntry {
    pub command: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramsPanel {
    pub diagrams: Vec<DiagramSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiagramSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WalkthroughPanel {
    #[serde(default)]
    pub intro: Option<String>,
    pub steps: Vec<WalkthroughStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WalkthroughStep {
    pub title: String,
    pub detail: String,
    #[serde(default)]
    pub command: Option<String>,
}
