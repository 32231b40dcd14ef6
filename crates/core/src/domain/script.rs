// Script Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension a file must carry to be offered as a script.
pub const SCRIPT_EXTENSION: &str = ".sh";

/// Validated script identifier.
///
/// A `ScriptName` is a single path component: it never contains a path
/// separator or a NUL byte and is never `.` or `..`, so joining it onto the
/// script root can only ever name an entry directly inside that root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScriptName(String);

impl ScriptName {
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name.contains('/') || name.contains('\\') {
            Some("name contains a path separator")
        } else if name == ".." || name == "." {
            Some("name is a directory token")
        } else if name.contains('\0') {
            Some("name contains a NUL byte")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name carries the recognized script extension
    pub fn has_script_extension(&self) -> bool {
        self.0.len() > SCRIPT_EXTENSION.len() && self.0.ends_with(SCRIPT_EXTENSION)
    }
}

impl TryFrom<String> for ScriptName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ScriptName> for String {
    fn from(name: ScriptName) -> Self {
        name.0
    }
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A script discovered in a store: its name and the path it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRef {
    pub name: ScriptName,
    pub path: PathBuf,
}

impl ScriptRef {
    pub fn new(name: ScriptName, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
