// Selection Session Domain Model

use crate::domain::error::{DomainError, Result};
use crate::domain::Host;
use serde::{Deserialize, Serialize};

/// Opaque caller identity (chat id, console id, ...)
pub type CallerId = String;

/// Phase of a selection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    AwaitingHost,
    AwaitingScript,
    Completed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingHost => write!(f, "AWAITING_HOST"),
            Phase::AwaitingScript => write!(f, "AWAITING_SCRIPT"),
            Phase::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Per-caller progress through host and script selection.
///
/// Phase only moves forward through the transition methods below, each of
/// which records the selection it depends on, or back to `AwaitingHost`
/// through [`SelectionSession::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSession {
    phase: Phase,
    host: Option<Host>,
    offered_scripts: Vec<String>,
    script: Option<String>,
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingHost,
            host: None,
            offered_scripts: Vec::new(),
            script: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn offered_scripts(&self) -> &[String] {
        &self.offered_scripts
    }

    /// Whether `name` was among the scripts listed for the chosen host
    pub fn offers(&self, name: &str) -> bool {
        self.offered_scripts.iter().any(|s| s == name)
    }

    /// AwaitingHost -> AwaitingScript, recording the host and its listing
    pub fn choose_host(&mut self, host: Host, offered_scripts: Vec<String>) -> Result<()> {
        if self.phase != Phase::AwaitingHost {
            return Err(self.invalid_transition(Phase::AwaitingScript));
        }
        if offered_scripts.is_empty() {
            return Err(DomainError::ValidationError(format!(
                "host '{}' offered no scripts",
                host.name
            )));
        }
        self.host = Some(host);
        self.offered_scripts = offered_scripts;
        self.phase = Phase::AwaitingScript;
        Ok(())
    }

    /// AwaitingScript -> Completed, recording the chosen script
    pub fn choose_script(&mut self, name: impl Into<String>) -> Result<()> {
        if self.phase != Phase::AwaitingScript || self.host.is_none() {
            return Err(self.invalid_transition(Phase::Completed));
        }
        let name = name.into();
        if !self.offers(&name) {
            return Err(DomainError::ValidationError(format!(
                "script '{}' was not offered",
                name
            )));
        }
        self.script = Some(name);
        self.phase = Phase::Completed;
        Ok(())
    }

    /// Any phase -> AwaitingHost, dropping every selection
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn invalid_transition(&self, to: Phase) -> DomainError {
        DomainError::InvalidStateTransition {
            from: self.phase.to_string(),
            to: to.to_string(),
        }
    }
}
