// src/models.rs

//! Serde models of the inventory document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- INVENTORY MODELS (What is read from and written to chop.toml) ---
// All mappings are `BTreeMap`s so that iteration is always in ascending,
// case-sensitive byte order. The listing relies on this.

/// A named remote host. Leaf of the hierarchy.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Same as the key the machine is stored under.
    pub name: String,
    /// Set when the machine is first registered.
    pub last_usage: DateTime<Utc>,
}

impl Machine {
    /// Creates a machine stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_usage: Utc::now(),
        }
    }
}

/// A group of machines, owned by exactly one account.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Same as the key the project is stored under.
    pub name: String,
    /// Machines by name.
    #[serde(default)]
    pub machines: BTreeMap<String, Machine>,
}

impl Project {
    /// Creates a project without machines.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            machines: BTreeMap::new(),
        }
    }
}

/// A top-level namespace (e.g. a cloud login context) grouping projects.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Same as the key the account is stored under.
    pub name: String,
    /// Projects by name.
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,
}

impl Account {
    /// Creates an account without projects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projects: BTreeMap::new(),
        }
    }
}

/// The whole persisted inventory plus the active-selection pointers.
///
/// Field order matters for TOML output: plain values must be emitted before
/// the tables, so `active_account` comes first.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Stored as a plain string in the file; the empty string means "unset".
    #[serde(default, with = "empty_string_as_none")]
    pub active_account: Option<String>,
    /// Account name -> name of that account's active project.
    #[serde(default)]
    pub active_projects: BTreeMap<String, String>,
    /// Accounts by name.
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

/// Maps `Option<String>` to a string field where `""` stands for `None`.
mod empty_string_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or_default())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.is_empty() { None } else { Some(raw) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_active_account_reads_as_none() {
        let config: Configuration = toml::from_str("activeAccount = \"\"\n").unwrap();
        assert_eq!(config.active_account, None);
        assert!(config.accounts.is_empty());
        assert!(config.active_projects.is_empty());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let config: Configuration = toml::from_str("").unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_unset_active_account_is_written_as_empty_string() {
        let text = toml::to_string(&Configuration::default()).unwrap();
        assert!(text.contains("activeAccount = \"\""));
    }

    #[test]
    fn test_camel_case_keys_are_used_in_the_document() {
        let mut config = Configuration::default();
        let mut project = Project::new("web");
        project
            .machines
            .insert("host1".to_string(), Machine::new("host1"));
        let mut account = Account::new("acme");
        account.projects.insert("web".to_string(), project);
        config.accounts.insert("acme".to_string(), account);
        config.active_account = Some("acme".to_string());
        config
            .active_projects
            .insert("acme".to_string(), "web".to_string());

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("activeAccount = \"acme\""));
        assert!(text.contains("[activeProjects]"));
        assert!(text.contains("lastUsage"));
        assert!(!text.contains("last_usage"));
    }
}
