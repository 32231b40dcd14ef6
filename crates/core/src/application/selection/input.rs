// Selection Protocol Input
// Transport-neutral form of what a caller can send

/// Start/reset command
pub const START_COMMAND: &str = "/start";

const HOST_ACTION_PREFIX: &str = "server:";
const SCRIPT_ACTION_PREFIX: &str = "script:";

/// One caller input, already classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    ChooseHost(String),
    ChooseScript(String),
    Unrecognized(String),
}

impl Input {
    /// Classify raw text or button data.
    ///
    /// `/start`, `/start@bot` and `/start <args>` all count as the start
    /// command; `server:<name>` and `script:<name>` are selection actions.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Some(rest) = trimmed.strip_prefix(START_COMMAND) {
            if rest.is_empty() || rest.starts_with('@') || rest.starts_with(char::is_whitespace) {
                return Input::Start;
            }
        }

        if let Some(name) = trimmed.strip_prefix(HOST_ACTION_PREFIX) {
            if !name.is_empty() {
                return Input::ChooseHost(name.to_string());
            }
        }

        if let Some(name) = trimmed.strip_prefix(SCRIPT_ACTION_PREFIX) {
            if !name.is_empty() {
                return Input::ChooseScript(name.to_string());
            }
        }

        Input::Unrecognized(trimmed.to_string())
    }
}

/// A selectable option offered to the caller (a keyboard button, a menu
/// entry...). Sending `action` back through [`Input::parse`] selects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub action: String,
}

impl Choice {
    pub fn host(name: &str) -> Self {
        Self {
            label: name.to_string(),
            action: format!("{}{}", HOST_ACTION_PREFIX, name),
        }
    }

    pub fn script(name: &str) -> Self {
        Self {
            label: name.to_string(),
            action: format!("{}{}", SCRIPT_ACTION_PREFIX, name),
        }
    }
}
