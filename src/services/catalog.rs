//! Lesson catalog
//!
//! Every module ships inside the binary as a YAML document. The catalog
//! deserializes them once at startup and refuses to start on content that
//! would leave a panel with nothing to show.

use crate::model::{Module, Panel};
use anyhow::{bail, Context, Result};
use std::collections::HashSet;

/// Embedded module sources as (file name, YAML), in sidebar order
pub const MODULE_SOURCES: &[(&str, &str)] = &[
    (
        "01-getting-started.yaml",
        include_str!("../../content/01-getting-started.yaml"),
    ),
    (
        "02-cluster-architecture.yaml",
        include_str!("../../content/02-cluster-architecture.yaml"),
    ),
    (
        "03-core-concepts.yaml",
        include_str!("../../content/03-core-concepts.yaml"),
    ),
    ("04-workloads.yaml", include_str!("../../content/04-workloads.yaml")),
    ("05-networking.yaml", include_str!("../../content/05-networking.yaml")),
    (
        "06-traffic-scaling.yaml",
        include_str!("../../content/06-traffic-scaling.yaml"),
    ),
    ("07-storage.yaml", include_str!("../../content/07-storage.yaml")),
    (
        "08-configuration.yaml",
        include_str!("../../content/08-configuration.yaml"),
    ),
    ("09-scheduling.yaml", include_str!("../../content/09-scheduling.yaml")),
    ("10-security.yaml", include_str!("../../content/10-security.yaml")),
    (
        "11-observability.yaml",
        include_str!("../../content/11-observability.yaml"),
    ),
    (
        "12-troubleshooting.yaml",
        include_str!("../../content/12-troubleshooting.yaml"),
    ),
    ("13-packaging.yaml", include_str!("../../content/13-packaging.yaml")),
    ("14-extending.yaml", include_str!("../../content/14-extending.yaml")),
    ("15-upgrades.yaml", include_str!("../../content/15-upgrades.yaml")),
];

/// Validated, ordered set of lesson modules
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Load the modules compiled into the binary
    pub fn load() -> Result<Self> {
        let catalog = Self::from_sources(MODULE_SOURCES)?;
        tracing::info!(modules = catalog.len(), "Loaded lesson catalog");
        Ok(catalog)
    }

    /// Parse and validate modules from (name, YAML) pairs
    pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self> {
        let mut modules = Vec::with_capacity(sources.len());
        let mut seen_ids = HashSet::new();

        for (name, yaml) in sources {
            let module: Module = serde_yaml::from_str(yaml)
                .with_context(|| format!("Failed to parse lesson module {}", name))?;

            if !seen_ids.insert(module.id.clone()) {
                bail!("Duplicate module id '{}' in {}", module.id, name);
            }
            validate_module(&module)
                .with_context(|| format!("Invalid lesson module '{}' ({})", module.id, name))?;

            modules.push(module);
        }

        if modules.is_empty() {
            bail!("Lesson catalog is empty");
        }

        Ok(Self { modules })
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    /// Position of a module by id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }
}

fn validate_module(module: &Module) -> Result<()> {
    if module.tabs.is_empty() {
        bail!("module has no tabs");
    }

    let mut tab_ids = HashSet::new();
    for tab in &module.tabs {
        if !tab_ids.insert(tab.id.as_str()) {
            bail!("duplicate tab id '{}'", tab.id);
        }
        validate_panel(&tab.id, &tab.panel)?;
    }

    if module.tab_index(&module.default_tab).is_none() {
        bail!("default tab '{}' does not exist", module.default_tab);
    }

    Ok(())
}

fn validate_panel(tab_id: &str, panel: &Panel) -> Result<()> {
    match panel {
        Panel::Diagrams(diagrams) => {
            if diagrams.diagrams.is_empty() {
                bail!("tab '{}' has no diagrams", tab_id);
            }
            if let Some(idx) = diagrams
                .diagrams
                .iter()
                .position(|d| d.source.trim().is_empty())
            {
                bail!("diagram {} in tab '{}' has an empty source", idx + 1, tab_id);
            }
        }
        Panel::Walkthrough(walkthrough) => {
            if walkthrough.steps.is_empty() {
                bail!("walkthrough in tab '{}' has no steps", tab_id);
            }
        }
        Panel::Commands(commands) => {
            if let Some(idx) = commands
                .commands
                .iter()
                .position(|c| c.command.trim().is_empty())
            {
                bail!("command {} in tab '{}' is empty", idx + 1, tab_id);
            }
        }
        Panel::Overview(_) | Panel::Concepts(_) | Panel::Yaml(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::renderer::{InstanceId, RenderId};
    use crate::diagram::{EngineConfig, EngineHandle};
    use serde::Deserialize;

    const MINIMAL: &str = r#"
id: demo
title: Demo
summary: A tiny module
default_tab: intro
tabs:
  - id: intro
    title: Intro
    panel:
      kind: overview
      paragraphs: ["Hello"]
"#;

    #[test]
    fn test_embedded_catalog_loads_all_modules() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.modules()[0].id, "getting-started");
        assert_eq!(catalog.modules()[11].id, "troubleshooting");
        assert_eq!(catalog.modules()[14].id, "upgrades");
        assert_eq!(catalog.index_of("extending"), Some(13));
        assert_eq!(catalog.index_of("storage"), Some(6));
        assert!(catalog.index_of("nope").is_none());
    }

    #[test]
    fn test_every_diagram_renders() {
        let catalog = Catalog::load().unwrap();
        let handle = EngineHandle::flowchart(EngineConfig::default());
        let instance = InstanceId::next();

        for module in catalog.modules() {
            for (n, (tab, diagram)) in module.diagrams().enumerate() {
                let id = RenderId::new(instance, n as u64);
                let source = diagram.source.trim();
                if let Err(e) = handle.engine().validate(source) {
                    panic!("{}/{} diagram {} rejected: {}", module.id, tab, n, e);
                }
                let markup = handle
                    .engine()
                    .render(&id, source)
                    .unwrap_or_else(|e| panic!("{}/{} diagram {} failed: {}", module.id, tab, n, e));
                assert!(!markup.is_empty(), "{}/{} diagram {} is empty", module.id, tab, n);
            }
        }
    }

    #[test]
    fn test_every_yaml_snippet_parses() {
        let catalog = Catalog::load().unwrap();
        let mut snippets = 0;

        for module in catalog.modules() {
            for tab in &module.tabs {
                let Panel::Yaml(panel) = &tab.panel else {
                    continue;
                };
                for example in &panel.examples {
                    for document in serde_yaml::Deserializer::from_str(&example.yaml) {
                        if let Err(e) = serde_yaml::Value::deserialize(document) {
                            panic!("{}: '{}' is not valid YAML: {}", module.id, example.title, e);
                        }
                    }
                    snippets += 1;
                }
            }
        }

        assert!(snippets >= 12);
    }

    #[test]
    fn test_default_tabs_resolve() {
        let catalog = Catalog::load().unwrap();
        let core = &catalog.modules()[catalog.index_of("core-concepts").unwrap()];
        assert_eq!(core.tabs[core.default_tab_index()].id, "concepts");
    }

    #[test]
    fn test_minimal_module_loads() {
        let catalog = Catalog::from_sources(&[("demo.yaml", MINIMAL)]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().title, "Demo");
    }

    #[test]
    fn test_duplicate_module_ids_rejected() {
        let err = Catalog::from_sources(&[("a.yaml", MINIMAL), ("b.yaml", MINIMAL)]).unwrap_err();
        assert!(err.to_string().contains("Duplicate module id 'demo'"));
    }

    #[test]
    fn test_missing_default_tab_rejected() {
        let yaml = MINIMAL.replace("default_tab: intro", "default_tab: missing");
        let err = Catalog::from_sources(&[("demo.yaml", &yaml)]).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Invalid lesson module 'demo'"));
        assert!(chain.contains("default tab 'missing'"));
    }

    #[test]
    fn test_empty_walkthrough_rejected() {
        let yaml = r#"
id: demo
title: Demo
summary: s
default_tab: steps
tabs:
  - id: steps
    title: Steps
    panel:
      kind: walkthrough
      steps: []
"#;
        let err = Catalog::from_sources(&[("demo.yaml", yaml)]).unwrap_err();
        assert!(format!("{:#}", err).contains("has no steps"));
    }

    #[test]
    fn test_blank_diagram_source_rejected() {
        let yaml = r#"
id: demo
title: Demo
summary: s
default_tab: d
tabs:
  - id: d
    title: Diagrams
    panel:
      kind: diagrams
      diagrams:
        - source: "   "
"#;
        let err = Catalog::from_sources(&[("demo.yaml", yaml)]).unwrap_err();
        assert!(format!("{:#}", err).contains("empty source"));
    }

    #[test]
    fn test_malformed_yaml_names_the_file() {
        let err = Catalog::from_sources(&[("broken.yaml", "id: [unclosed")]).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(Catalog::from_sources(&[]).is_err());
    }
}
