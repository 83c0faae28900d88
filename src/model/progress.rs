//! Learning progress persistence

use crate::config::Config;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Visits recorded for one module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleVisit {
    pub module_id: String,
    pub first_visited: DateTime<Local>,
    pub last_visited: DateTime<Local>,
    /// Tab ids opened at least once
    #[serde(default)]
    pub tabs_seen: Vec<String>,
}

/// Everything remembered between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub visits: Vec<ModuleVisit>,
    #[serde(default)]
    pub last_module: Option<String>,
    #[serde(default)]
    pub last_tab: Option<String>,
}

impl Progress {
    fn progress_path() -> Option<PathBuf> {
        Config::config_dir().map(|dir| dir.join("progress.json"))
    }

    /// Load from `~/.kube-tutor/progress.json`
    pub fn load() -> Progress {
        match Self::progress_path() {
            Some(path) => Self::load_from(&path),
            None => Progress::default(),
        }
    }

    /// Load from a file; missing or corrupt files give empty progress
    pub fn load_from(path: &Path) -> Progress {
        if !path.exists() {
            return Progress::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Could not read progress file {}: {}", path.display(), e);
                return Progress::default();
            }
        };

        match serde_json::from_str::<Progress>(&contents) {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!("Ignoring corrupt progress file {}: {}", path.display(), e);
                Progress::default()
            }
        }
    }

    /// Save to `~/.kube-tutor/progress.json`
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::progress_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine progress path"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Record that a module tab was opened
    pub fn record_visit(&mut self, module_id: &str, tab_id: &str, now: DateTime<Local>) {
        match self.visits.iter_mut().find(|v| v.module_id == module_id) {
            Some(visit) => {
                visit.last_visited = now;
                if !visit.tabs_seen.iter().any(|t| t == tab_id) {
                    visit.tabs_seen.push(tab_id.to_string());
                }
            }
            None => self.visits.push(ModuleVisit {
                module_id: module_id.to_string(),
                first_visited: now,
                last_visited: now,
                tabs_seen: vec![tab_id.to_string()],
            }),
        }
        self.last_module = Some(module_id.to_string());
        self.last_tab = Some(tab_id.to_string());
    }

    pub fn visit(&self, module_id: &str) -> Option<&ModuleVisit> {
        self.visits.iter().find(|v| v.module_id == module_id)
    }

    pub fn is_visited(&self, module_id: &str) -> bool {
        self.visit(module_id).is_some()
    }

    /// Number of tabs of a module opened so far
    pub fn tabs_seen(&self, module_id: &str) -> usize {
        self.visit(module_id).map_or(0, |v| v.tabs_seen.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_record_visit_tracks_tabs_once() {
        let mut progress = Progress::default();
        progress.record_visit("workloads", "overview", at(9));
        progress.record_visit("workloads", "yaml", at(10));
        progress.record_visit("workloads", "overview", at(11));

        let visit = progress.visit("workloads").unwrap();
        assert_eq!(visit.tabs_seen, vec!["overview", "yaml"]);
        assert_eq!(visit.first_visited, at(9));
        assert_eq!(visit.last_visited, at(11));
        assert_eq!(progress.last_tab.as_deref(), Some("overview"));
        assert_eq!(progress.tabs_seen("workloads"), 2);
        assert!(!progress.is_visited("storage"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        let mut progress = Progress::default();
        progress.record_visit("networking", "diagrams", at(8));
        progress.save_to(&path).unwrap();

        assert_eq!(Progress::load_from(&path), progress);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Progress::load_from(&dir.path().join("nope.json")),
            Progress::default()
        );
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Progress::load_from(&path), Progress::default());
    }
}
