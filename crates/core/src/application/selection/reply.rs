// Selection Protocol Replies

use super::input::{Choice, START_COMMAND};
use crate::domain::{ExecutionResult, Phase};

pub const HOST_PROMPT: &str = "Choose a server:";
pub const SCRIPT_PROMPT: &str = "Choose a script:";
pub const NO_HOSTS: &str = "No servers are configured.";
pub const HOST_NOT_FOUND: &str = "Error: server not found.";
pub const SCRIPT_NOT_FOUND: &str = "Error: script not found.";
pub const NO_SCRIPTS: &str = "No scripts are available on this server.";
pub const LIST_FAILED: &str = "Could not fetch the script list.";
pub const RUN_FAILED: &str = "Could not run the script.";
pub const NO_OUTPUT: &str = "Script finished without output.";

/// What the protocol answers to one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Messages to show, in order
    pub messages: Vec<String>,
    /// Options to offer alongside the last message
    pub choices: Vec<Choice>,
    /// Session phase after this input
    pub phase: Phase,
}

impl Reply {
    pub fn text(message: impl Into<String>, phase: Phase) -> Self {
        Self {
            messages: vec![message.into()],
            choices: Vec::new(),
            phase,
        }
    }

    pub fn with_choices(message: impl Into<String>, choices: Vec<Choice>, phase: Phase) -> Self {
        Self {
            messages: vec![message.into()],
            choices,
            phase,
        }
    }

    /// Out-of-sequence input
    pub fn rejected(phase: Phase) -> Self {
        Self::text(unknown_command(), phase)
    }
}

pub fn unknown_command() -> String {
    format!("Unknown command. Try {}", START_COMMAND)
}

pub fn running(script: &str, host: &str) -> String {
    format!("Running '{}' on '{}'...", script, host)
}

/// Render a run result; empty sections are left out.
pub fn render_result(result: &ExecutionResult) -> String {
    let mut text = String::new();

    if !result.output.is_empty() {
        text.push_str(&format!("Output:\n{}\n", result.output));
    }
    if !result.error.is_empty() {
        text.push_str(&format!("Errors:\n{}\n", result.error));
    }
    if result.is_silent() {
        text.push_str(NO_OUTPUT);
        text.push('\n');
    }
    text.push_str(&format!("Exit code: {}", result.return_code));

    text
}
