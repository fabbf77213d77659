//! Worker registry: an immutable capability table of worker profiles.
//!
//! The built-in catalog lives in `taskweave/workers/builtin.yaml`, embedded at
//! compile time via `include_str!` and parsed when the registry is built.
//! Registries are constructed explicitly and injected into the orchestrator
//! (never a process-wide singleton), so tests and embedders can run different
//! catalogs side by side. Custom catalogs load from any YAML string with the
//! same shape; the engine itself never changes when workers are added.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in worker catalog, one YAML list of profiles.
const BUILTIN_WORKERS_YAML: &str = include_str!("../workers/builtin.yaml");

/// Immutable descriptor of one worker: who it is and how to prompt it.
///
/// `expertise` is shown to the planner when choosing assignees;
/// `system_prompt` is prepended to every task prompt for this worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub name: String,
    pub role: String,
    pub expertise: String,
    pub system_prompt: String,
}

/// Errors from building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse worker catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate worker id in catalog: {0}")]
    Duplicate(String),
}

/// Ordered, read-only lookup table of worker profiles.
///
/// Insertion order is part of the contract: tasks without an explicit
/// assignee round-robin through `ids()` by task index.
#[derive(Debug, Clone)]
pub struct WorkerRegistry {
    profiles: Vec<WorkerProfile>,
}

impl WorkerRegistry {
    /// Builds the registry from the embedded built-in catalog
    /// (researcher, coder, writer, analyst).
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml_str(BUILTIN_WORKERS_YAML)
    }

    /// Parses a YAML list of profiles into a registry.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let profiles: Vec<WorkerProfile> = serde_yaml::from_str(yaml)?;
        Self::from_profiles(profiles)
    }

    /// Builds a registry from explicit profiles, rejecting duplicate names.
    pub fn from_profiles(profiles: Vec<WorkerProfile>) -> Result<Self, RegistryError> {
        for (i, p) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|q| q.name == p.name) {
                return Err(RegistryError::Duplicate(p.name.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// Looks up one profile by id. Unknown ids are tolerated by callers: the
    /// executor treats a missing worker as an empty prompt contribution.
    pub fn get(&self, id: &str) -> Option<&WorkerProfile> {
        self.profiles.iter().find(|p| p.name == id)
    }

    /// Worker ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    /// Profiles in insertion order, for building the planner's
    /// `(id, expertise)` listing.
    pub fn iter(&self) -> impl Iterator<Item = &WorkerProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Embedded catalog parses and contains the four built-ins
    /// in round-robin order.
    #[test]
    fn builtin_catalog_parses_with_expected_workers() {
        let registry = WorkerRegistry::builtin().expect("workers/builtin.yaml must parse");
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, vec!["researcher", "coder", "writer", "analyst"]);
        let coder = registry.get("coder").expect("coder profile");
        assert_eq!(coder.role, "Software Engineer");
        assert!(!coder.system_prompt.is_empty());
    }

    /// **Scenario**: Unknown ids return None rather than erroring.
    #[test]
    fn get_unknown_id_is_none() {
        let registry = WorkerRegistry::builtin().unwrap();
        assert!(registry.get("ghostwriter").is_none());
    }

    /// **Scenario**: Duplicate names in a custom catalog are rejected.
    #[test]
    fn duplicate_names_rejected() {
        let yaml = "
- name: a
  role: r
  expertise: e
  system_prompt: s
- name: a
  role: r2
  expertise: e2
  system_prompt: s2
";
        let err = WorkerRegistry::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "a"));
    }

    /// **Scenario**: An empty list is a valid (empty) registry; the
    /// orchestrator rejects it at construction instead.
    #[test]
    fn empty_catalog_is_empty_registry() {
        let registry = WorkerRegistry::from_profiles(vec![]).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
