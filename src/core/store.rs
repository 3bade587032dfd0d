// src/core/store.rs

//! Mutation and query operations on the inventory.
//!
//! Every operation checks that the entities it refers to exist *before* it
//! touches anything. A failing operation therefore leaves the configuration
//! exactly as it found it. Adding an entity that already exists is a success
//! (reported through the returned `bool`), never an error.

use crate::models::{Account, Configuration, Machine, Project};
use std::fmt;
use thiserror::Error;

/// The three levels of the inventory hierarchy, used to qualify errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Top level.
    Account,
    /// Child of an account.
    Project,
    /// Child of a project.
    Machine,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Account => "Account",
            Self::Project => "Project",
            Self::Machine => "Machine",
        })
    }
}

/// Represents errors that can occur while operating on the inventory or its file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A referenced account, project or machine does not exist.
    /// `path` is qualified with its parents, e.g. `acme/web/host1`.
    #[error("{kind} '{path}' does not exist.")]
    NotFound {
        /// Which level of the hierarchy was missing.
        kind: EntityKind,
        /// The qualified name that was looked up.
        path: String,
    },
    /// The operation needed an active account and none is set.
    #[error("No active account set.")]
    NoActiveAccount,
    /// The operation needed an active project and the account has none.
    #[error("No active project set for account '{account}'.")]
    NoActiveProject {
        /// The account that was resolved for the operation.
        account: String,
    },
    /// A filesystem I/O error occurred.
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    /// The inventory file exists but is not a valid document.
    #[error("Failed to parse inventory file: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    /// An error occurred while serializing the inventory to TOML format.
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// The temporary file could not be moved over the inventory file.
    #[error("Failed to replace inventory file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl StoreError {
    fn account_not_found(account: &str) -> Self {
        Self::NotFound {
            kind: EntityKind::Account,
            path: account.to_string(),
        }
    }

    fn project_not_found(account: &str, project: &str) -> Self {
        Self::NotFound {
            kind: EntityKind::Project,
            path: format!("{account}/{project}"),
        }
    }

    fn machine_not_found(account: &str, project: &str, machine: &str) -> Self {
        Self::NotFound {
            kind: EntityKind::Machine,
            path: format!("{account}/{project}/{machine}"),
        }
    }
}

/// Result alias for inventory operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl Configuration {
    // --- Lookups ---

    fn account_mut(&mut self, account: &str) -> StoreResult<&mut Account> {
        self.accounts
            .get_mut(account)
            .ok_or_else(|| StoreError::account_not_found(account))
    }

    fn project_mut(&mut self, account: &str, project: &str) -> StoreResult<&mut Project> {
        self.account_mut(account)?
            .projects
            .get_mut(project)
            .ok_or_else(|| StoreError::project_not_found(account, project))
    }

    /// Returns the active project recorded for `account`, if any.
    pub fn active_project(&self, account: &str) -> Option<&str> {
        self.active_projects
            .get(account)
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Whether `account` is the currently active account.
    pub fn is_active_account(&self, account: &str) -> bool {
        self.active_account.as_deref() == Some(account)
    }

    /// Picks the account an operation should target: the explicit name if one
    /// was given (and non-empty), otherwise the active account.
    pub fn resolve_account(&self, explicit: Option<&str>) -> StoreResult<String> {
        match explicit.filter(|a| !a.is_empty()) {
            Some(account) => Ok(account.to_string()),
            None => self
                .active_account
                .clone()
                .ok_or(StoreError::NoActiveAccount),
        }
    }

    /// Picks the project an operation should target inside `account`: the
    /// explicit name if given, otherwise the account's active project.
    pub fn resolve_project(&self, account: &str, explicit: Option<&str>) -> StoreResult<String> {
        match explicit.filter(|p| !p.is_empty()) {
            Some(project) => Ok(project.to_string()),
            None => self
                .active_project(account)
                .map(str::to_string)
                .ok_or_else(|| StoreError::NoActiveProject {
                    account: account.to_string(),
                }),
        }
    }

    // --- Accounts ---

    /// Inserts an empty account. Returns `false` if it already existed.
    pub fn add_account(&mut self, account: &str) -> bool {
        if self.accounts.contains_key(account) {
            return false;
        }
        log::debug!("Adding account '{}'", account);
        self.accounts
            .insert(account.to_string(), Account::new(account));
        true
    }

    /// Makes `account` the active account.
    ///
    /// This clears the active project of *every* account, not only the one
    /// being activated.
    pub fn set_active_account(&mut self, account: &str) -> StoreResult<()> {
        if !self.accounts.contains_key(account) {
            return Err(StoreError::account_not_found(account));
        }
        log::debug!(
            "Activating account '{}', clearing {} active project pointer(s)",
            account,
            self.active_projects.len()
        );
        self.active_account = Some(account.to_string());
        self.active_projects.clear();
        Ok(())
    }

    /// Clears the active account and returns the previous value. The per-account
    /// active projects are left as they are.
    pub fn unset_active_account(&mut self) -> Option<String> {
        self.active_account.take()
    }

    /// Removes an account with all of its projects and machines, together with
    /// every active pointer that referenced it.
    pub fn delete_account(&mut self, account: &str) -> StoreResult<Account> {
        let removed = self
            .accounts
            .remove(account)
            .ok_or_else(|| StoreError::account_not_found(account))?;

        if self.is_active_account(account) {
            self.active_account = None;
        }
        self.active_projects.remove(account);
        log::debug!(
            "Deleted account '{}' ({} project(s))",
            account,
            removed.projects.len()
        );
        Ok(removed)
    }

    // --- Projects ---

    /// Inserts an empty project under `account`. Returns `false` if it already existed.
    pub fn add_project(&mut self, account: &str, project: &str) -> StoreResult<bool> {
        let acc = self.account_mut(account)?;
        if acc.projects.contains_key(project) {
            return Ok(false);
        }
        log::debug!("Adding project '{}/{}'", account, project);
        acc.projects
            .insert(project.to_string(), Project::new(project));
        Ok(true)
    }

    /// Records `project` as the active project of `account`.
    pub fn set_active_project(&mut self, account: &str, project: &str) -> StoreResult<()> {
        self.project_mut(account, project)?;
        self.active_projects
            .insert(account.to_string(), project.to_string());
        Ok(())
    }

    /// Clears the active project of `account`, or of the active account when
    /// `account` is `None` or empty.
    ///
    /// Returns the resolved account and the project that was active.
    pub fn unset_active_project(&mut self, account: Option<&str>) -> StoreResult<(String, String)> {
        let explicit = account.filter(|a| !a.is_empty());
        let account = self.resolve_account(explicit)?;
        if explicit.is_some() && !self.accounts.contains_key(&account) {
            return Err(StoreError::account_not_found(&account));
        }
        match self.active_projects.remove(&account) {
            Some(project) => Ok((account, project)),
            None => Err(StoreError::NoActiveProject { account }),
        }
    }

    /// Removes a project and its machines. If it was the account's active
    /// project, that pointer is cleared as well.
    pub fn delete_project(&mut self, account: &str, project: &str) -> StoreResult<Project> {
        let removed = self
            .account_mut(account)?
            .projects
            .remove(project)
            .ok_or_else(|| StoreError::project_not_found(account, project))?;

        if self.active_project(account) == Some(project) {
            self.active_projects.remove(account);
        }
        log::debug!(
            "Deleted project '{}/{}' ({} machine(s))",
            account,
            project,
            removed.machines.len()
        );
        Ok(removed)
    }

    // --- Machines ---

    /// Registers a machine under the active project of `account`.
    pub fn add_machine(&mut self, account: &str, machine: &str) -> StoreResult<bool> {
        if !self.accounts.contains_key(account) {
            return Err(StoreError::account_not_found(account));
        }
        let project = self.resolve_project(account, None)?;
        self.add_machine_to_project(account, &project, machine)
    }

    /// Registers a machine under an explicitly named project. Returns `false`
    /// if the machine was already there; its timestamp is not touched then.
    pub fn add_machine_to_project(
        &mut self,
        account: &str,
        project: &str,
        machine: &str,
    ) -> StoreResult<bool> {
        let proj = self.project_mut(account, project)?;
        if proj.machines.contains_key(machine) {
            return Ok(false);
        }
        log::debug!("Adding machine '{}/{}/{}'", account, project, machine);
        proj.machines
            .insert(machine.to_string(), Machine::new(machine));
        Ok(true)
    }

    /// Removes a machine from a project.
    pub fn delete_machine(
        &mut self,
        account: &str,
        project: &str,
        machine: &str,
    ) -> StoreResult<Machine> {
        self.project_mut(account, project)?
            .machines
            .remove(machine)
            .ok_or_else(|| StoreError::machine_not_found(account, project, machine))
    }

    // --- Whole-inventory operations ---

    /// Forgets everything: accounts, projects, machines and all pointers.
    pub fn prune(&mut self) {
        log::info!("Pruning {} account(s)", self.accounts.len());
        *self = Self::default();
    }

    /// Repairs a configuration that was loaded from disk.
    ///
    /// Drops active pointers that name missing accounts or projects, and
    /// realigns `name` fields with the keys they are stored under. Returns one
    /// human-readable line per repair.
    pub fn enforce_invariants(&mut self) -> Vec<String> {
        let mut repairs = Vec::new();

        if let Some(active) = &self.active_account
            && !self.accounts.contains_key(active)
        {
            repairs.push(format!("cleared active account '{active}' (no such account)"));
            self.active_account = None;
        }

        let accounts = &self.accounts;
        self.active_projects.retain(|account, project| {
            let valid = accounts
                .get(account)
                .is_some_and(|acc| acc.projects.contains_key(project));
            if !valid {
                repairs.push(format!(
                    "cleared active project '{project}' of account '{account}' (no such project)"
                ));
            }
            valid
        });

        for (account_key, account) in &mut self.accounts {
            if account.name != *account_key {
                repairs.push(format!("renamed account record under '{account_key}'"));
                account.name = account_key.clone();
            }
            for (project_key, project) in &mut account.projects {
                if project.name != *project_key {
                    repairs.push(format!(
                        "renamed project record under '{account_key}/{project_key}'"
                    ));
                    project.name = project_key.clone();
                }
                for (machine_key, machine) in &mut project.machines {
                    if machine.name != *machine_key {
                        repairs.push(format!(
                            "renamed machine record under '{account_key}/{project_key}/{machine_key}'"
                        ));
                        machine.name = machine_key.clone();
                    }
                }
            }
        }

        repairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// acme -> web -> host1, with acme and web active.
    fn populated() -> Configuration {
        let mut config = Configuration::default();
        config.add_account("acme");
        config.set_active_account("acme").unwrap();
        config.add_project("acme", "web").unwrap();
        config.set_active_project("acme", "web").unwrap();
        config.add_machine("acme", "host1").unwrap();
        config
    }

    #[test]
    fn test_add_account_is_idempotent() {
        let mut config = Configuration::default();
        assert!(config.add_account("acme"));
        for _ in 0..5 {
            assert!(!config.add_account("acme"));
        }
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts["acme"].name, "acme");
    }

    #[test]
    fn test_add_account_does_not_reset_existing_projects() {
        let mut config = populated();
        config.add_account("acme");
        assert!(config.accounts["acme"].projects["web"].machines.contains_key("host1"));
    }

    #[test]
    fn test_full_activation_scenario() {
        let config = populated();
        let machines = &config.accounts["acme"].projects["web"].machines;
        assert_eq!(machines.len(), 1);
        assert_eq!(machines["host1"].name, "host1");
        assert_eq!(config.active_account.as_deref(), Some("acme"));
        assert_eq!(config.active_projects.len(), 1);
        assert_eq!(config.active_project("acme"), Some("web"));
    }

    #[test]
    fn test_set_active_account_requires_existing_account() {
        let mut config = Configuration::default();
        let err = config.set_active_account("ghost").unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound { kind: EntityKind::Account, .. }
        ));
        assert_eq!(config.active_account, None);
    }

    #[test]
    fn test_set_active_account_clears_every_active_project() {
        let mut config = populated();
        config.add_account("other");
        config.add_project("other", "api").unwrap();
        config.set_active_project("other", "api").unwrap();
        assert_eq!(config.active_projects.len(), 2);

        config.set_active_account("other").unwrap();

        assert!(config.active_projects.is_empty());
        assert_eq!(config.active_project("acme"), None);
        assert_eq!(config.active_project("other"), None);
    }

    #[test]
    fn test_add_project_requires_account() {
        let mut config = Configuration::default();
        assert!(matches!(
            config.add_project("ghost", "web"),
            Err(StoreError::NotFound { kind: EntityKind::Account, .. })
        ));
    }

    #[test]
    fn test_add_project_is_idempotent() {
        let mut config = populated();
        assert!(!config.add_project("acme", "web").unwrap());
        assert_eq!(config.accounts["acme"].projects["web"].machines.len(), 1);
    }

    #[test]
    fn test_set_active_project_to_missing_project_leaves_store_unchanged() {
        let mut config = populated();
        let before = config.clone();
        let err = config.set_active_project("acme", "nonexistent").unwrap_err();
        assert!(matches!(
            &err,
            StoreError::NotFound { kind: EntityKind::Project, path } if path == "acme/nonexistent"
        ));
        assert_eq!(config, before);
    }

    #[test]
    fn test_add_machine_without_active_project_fails() {
        let mut config = Configuration::default();
        config.add_account("acme");
        config.add_project("acme", "web").unwrap();
        config.add_project("acme", "db").unwrap();

        let err = config.add_machine("acme", "host1").unwrap_err();
        assert!(matches!(err, StoreError::NoActiveProject { account } if account == "acme"));
        assert!(config.accounts["acme"].projects["web"].machines.is_empty());
    }

    #[test]
    fn test_add_machine_with_unknown_account_fails() {
        let mut config = populated();
        assert!(matches!(
            config.add_machine("ghost", "host1"),
            Err(StoreError::NotFound { kind: EntityKind::Account, .. })
        ));
    }

    #[test]
    fn test_add_machine_with_dangling_active_project_fails() {
        let mut config = populated();
        config
            .active_projects
            .insert("acme".to_string(), "vanished".to_string());
        assert!(matches!(
            config.add_machine("acme", "host2"),
            Err(StoreError::NotFound { kind: EntityKind::Project, .. })
        ));
    }

    #[test]
    fn test_add_machine_keeps_original_timestamp() {
        let mut config = populated();
        let first = config.accounts["acme"].projects["web"].machines["host1"].last_usage;
        assert!(!config.add_machine("acme", "host1").unwrap());
        assert_eq!(
            config.accounts["acme"].projects["web"].machines["host1"].last_usage,
            first
        );
    }

    #[test]
    fn test_add_machine_to_explicit_project_ignores_active_pointer() {
        let mut config = populated();
        config.add_project("acme", "db").unwrap();
        assert!(config.add_machine_to_project("acme", "db", "pg1").unwrap());
        assert!(config.accounts["acme"].projects["db"].machines.contains_key("pg1"));
        assert!(!config.accounts["acme"].projects["web"].machines.contains_key("pg1"));
    }

    #[test]
    fn test_machine_names_may_repeat_across_projects() {
        let mut config = populated();
        config.add_project("acme", "db").unwrap();
        assert!(config.add_machine_to_project("acme", "db", "host1").unwrap());
        assert_eq!(config.accounts["acme"].projects["web"].machines.len(), 1);
        assert_eq!(config.accounts["acme"].projects["db"].machines.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut config = Configuration::default();
        assert!(config.add_account("Acme"));
        assert!(config.add_account("acme"));
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn test_delete_active_account_clears_pointers() {
        let mut config = populated();
        let removed = config.delete_account("acme").unwrap();
        assert_eq!(removed.projects.len(), 1);
        assert_eq!(config.active_account, None);
        assert!(!config.active_projects.contains_key("acme"));
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_delete_inactive_account_drops_its_active_project() {
        let mut config = populated();
        config.add_account("other");
        config.add_project("other", "api").unwrap();
        config.set_active_project("other", "api").unwrap();

        config.delete_account("other").unwrap();

        assert_eq!(config.active_account.as_deref(), Some("acme"));
        assert_eq!(config.active_project("acme"), Some("web"));
        assert!(!config.active_projects.contains_key("other"));
    }

    #[test]
    fn test_delete_missing_account_fails() {
        let mut config = populated();
        let before = config.clone();
        assert!(config.delete_account("ghost").is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_delete_active_project_clears_pointer_but_keeps_account() {
        let mut config = populated();
        let removed = config.delete_project("acme", "web").unwrap();
        assert!(removed.machines.contains_key("host1"));
        assert!(config.accounts.contains_key("acme"));
        assert!(config.accounts["acme"].projects.is_empty());
        assert!(!config.active_projects.contains_key("acme"));
        assert_eq!(config.active_account.as_deref(), Some("acme"));
    }

    #[test]
    fn test_delete_inactive_project_keeps_pointer() {
        let mut config = populated();
        config.add_project("acme", "db").unwrap();
        config.delete_project("acme", "db").unwrap();
        assert_eq!(config.active_project("acme"), Some("web"));
    }

    #[test]
    fn test_delete_project_reports_missing_levels() {
        let mut config = populated();
        assert!(matches!(
            config.delete_project("ghost", "web"),
            Err(StoreError::NotFound { kind: EntityKind::Account, .. })
        ));
        assert!(matches!(
            config.delete_project("acme", "ghost"),
            Err(StoreError::NotFound { kind: EntityKind::Project, .. })
        ));
    }

    #[test]
    fn test_delete_machine_mutates_in_place() {
        let mut config = populated();
        let removed = config.delete_machine("acme", "web", "host1").unwrap();
        assert_eq!(removed.name, "host1");
        assert!(config.accounts["acme"].projects["web"].machines.is_empty());
    }

    #[test]
    fn test_delete_machine_reports_missing_levels() {
        let mut config = populated();
        assert!(matches!(
            config.delete_machine("ghost", "web", "host1"),
            Err(StoreError::NotFound { kind: EntityKind::Account, .. })
        ));
        assert!(matches!(
            config.delete_machine("acme", "ghost", "host1"),
            Err(StoreError::NotFound { kind: EntityKind::Project, .. })
        ));
        assert!(matches!(
            config.delete_machine("acme", "web", "ghost"),
            Err(StoreError::NotFound { kind: EntityKind::Machine, path }) if path == "acme/web/ghost"
        ));
    }

    #[test]
    fn test_unset_active_account_keeps_active_projects() {
        let mut config = populated();
        assert_eq!(config.unset_active_account().as_deref(), Some("acme"));
        assert_eq!(config.active_account, None);
        assert_eq!(config.active_project("acme"), Some("web"));
        assert_eq!(config.unset_active_account(), None);
    }

    #[test]
    fn test_unset_active_project_without_active_account_fails() {
        let mut config = Configuration::default();
        assert!(matches!(
            config.unset_active_project(Some("")),
            Err(StoreError::NoActiveAccount)
        ));
        assert!(matches!(
            config.unset_active_project(None),
            Err(StoreError::NoActiveAccount)
        ));
    }

    #[test]
    fn test_unset_active_project_uses_active_account() {
        let mut config = populated();
        let (account, project) = config.unset_active_project(None).unwrap();
        assert_eq!((account.as_str(), project.as_str()), ("acme", "web"));
        assert!(config.active_projects.is_empty());
        assert!(matches!(
            config.unset_active_project(None),
            Err(StoreError::NoActiveProject { .. })
        ));
    }

    #[test]
    fn test_unset_active_project_for_explicit_account() {
        let mut config = populated();
        config.add_account("other");
        assert!(matches!(
            config.unset_active_project(Some("ghost")),
            Err(StoreError::NotFound { kind: EntityKind::Account, .. })
        ));
        assert!(matches!(
            config.unset_active_project(Some("other")),
            Err(StoreError::NoActiveProject { account }) if account == "other"
        ));
        config.unset_active_project(Some("acme")).unwrap();
        assert_eq!(config.active_project("acme"), None);
    }

    #[test]
    fn test_resolve_helpers_prefer_explicit_names() {
        let config = populated();
        assert_eq!(config.resolve_account(Some("other")).unwrap(), "other");
        assert_eq!(config.resolve_account(Some("")).unwrap(), "acme");
        assert_eq!(config.resolve_project("acme", None).unwrap(), "web");
        assert_eq!(config.resolve_project("acme", Some("db")).unwrap(), "db");
        assert!(matches!(
            config.resolve_project("other", None),
            Err(StoreError::NoActiveProject { .. })
        ));
        assert!(matches!(
            Configuration::default().resolve_account(None),
            Err(StoreError::NoActiveAccount)
        ));
    }

    #[test]
    fn test_prune_forgets_everything() {
        let mut config = populated();
        config.prune();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_enforce_invariants_drops_stale_pointers() {
        let mut config = populated();
        config.active_account = Some("ghost".to_string());
        config
            .active_projects
            .insert("ghost".to_string(), "web".to_string());
        config
            .active_projects
            .insert("acme".to_string(), "gone".to_string());

        let repairs = config.enforce_invariants();

        assert_eq!(repairs.len(), 3);
        assert_eq!(config.active_account, None);
        assert!(config.active_projects.is_empty());
    }

    #[test]
    fn test_enforce_invariants_realigns_names_with_keys() {
        let mut config = populated();
        if let Some(account) = config.accounts.get_mut("acme") {
            account.name = String::new();
        }
        let repairs = config.enforce_invariants();
        assert_eq!(repairs.len(), 1);
        assert_eq!(config.accounts["acme"].name, "acme");
    }

    #[test]
    fn test_enforce_invariants_is_silent_on_consistent_data() {
        let mut config = populated();
        assert!(config.enforce_invariants().is_empty());
    }
}
