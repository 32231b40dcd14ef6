// Host Catalog - static set of selectable hosts

use crate::domain::Host;
use crate::error::{AppError, Result};
use std::collections::HashSet;
use std::path::Path;

/// The configured hosts, in configuration order.
///
/// Built once at startup; names are unique and non-empty.
#[derive(Debug, Clone)]
pub struct HostCatalog {
    hosts: Vec<Host>,
}

impl HostCatalog {
    pub fn new(hosts: Vec<Host>) -> Result<Self> {
        let mut seen = HashSet::new();
        for host in &hosts {
            if host.name.trim().is_empty() {
                return Err(AppError::Config("host name must not be empty".into()));
            }
            if host.base_url.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "host '{}' has an empty base_url",
                    host.name
                )));
            }
            if !seen.insert(host.name.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate host name '{}'",
                    host.name
                )));
            }
        }
        Ok(Self { hosts })
    }

    /// Parse a JSON array of `{"name", "base_url"}` records
    pub fn from_json(json: &str) -> Result<Self> {
        let hosts: Vec<Host> = serde_json::from_str(json)?;
        Self::new(hosts)
    }

    /// Load the catalog from a JSON file; a missing file is a configuration error
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "cannot read hosts file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn find(&self, name: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.name == name)
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
