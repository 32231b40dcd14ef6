// Selection Protocol - host -> script -> run, one caller at a time
//
// Each phase has its own transition function. Every failure (unknown host,
// transport fault, stale selection) is logged, reported to the caller and
// evicts the session, which puts the caller back at AwaitingHost.

pub mod input;
pub mod reply;
mod sessions;

pub use input::{Choice, Input, START_COMMAND};
pub use reply::{render_result, Reply};
pub use sessions::SessionMap;

use crate::application::hosts::HostCatalog;
use crate::domain::{Phase, SelectionSession};
use crate::port::ExecutionEndpoint;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Selection Protocol state machine
pub struct SelectionProtocol {
    hosts: Arc<HostCatalog>,
    endpoint: Arc<dyn ExecutionEndpoint>,
    sessions: SessionMap,
}

impl SelectionProtocol {
    pub fn new(hosts: Arc<HostCatalog>, endpoint: Arc<dyn ExecutionEndpoint>) -> Self {
        Self {
            hosts,
            endpoint,
            sessions: SessionMap::new(),
        }
    }

    /// Feed one input from `caller` through the state machine
    pub async fn handle(&self, caller: &str, input: Input) -> Reply {
        let session = self.sessions.get(caller);
        debug!(caller = %caller, phase = %session.phase(), input = ?input, "Selection input");

        if input == Input::Start {
            return self.start(caller);
        }

        match session.phase() {
            Phase::AwaitingHost => self.on_awaiting_host(caller, session, input).await,
            Phase::AwaitingScript => self.on_awaiting_script(caller, session, input).await,
            // Completed behaves like a reset: the next input is a host selection
            Phase::Completed => {
                self.sessions.evict(caller);
                self.on_awaiting_host(caller, SelectionSession::new(), input)
                    .await
            }
        }
    }

    /// Convenience for text-based front-ends
    pub async fn handle_text(&self, caller: &str, raw: &str) -> Reply {
        self.handle(caller, Input::parse(raw)).await
    }

    /// Phase `caller` is currently in
    pub fn phase(&self, caller: &str) -> Phase {
        self.sessions.get(caller).phase()
    }

    /// Number of callers with a session in progress
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn hosts(&self) -> &HostCatalog {
        &self.hosts
    }

    fn start(&self, caller: &str) -> Reply {
        self.sessions.evict(caller);

        if self.hosts.is_empty() {
            warn!(caller = %caller, "No hosts configured");
            return Reply::text(reply::NO_HOSTS, Phase::AwaitingHost);
        }

        let choices = self
            .hosts
            .hosts()
            .iter()
            .map(|h| Choice::host(&h.name))
            .collect();
        Reply::with_choices(reply::HOST_PROMPT, choices, Phase::AwaitingHost)
    }

    async fn on_awaiting_host(
        &self,
        caller: &str,
        mut session: SelectionSession,
        input: Input,
    ) -> Reply {
        let host_name = match input {
            Input::ChooseHost(name) => name,
            _ => return Reply::rejected(session.phase()),
        };

        let host = match self.hosts.find(&host_name) {
            Some(host) => host.clone(),
            None => {
                warn!(caller = %caller, host = %host_name, "Selected host is not configured");
                return self.fail(caller, reply::HOST_NOT_FOUND);
            }
        };

        let scripts = match self.endpoint.list_scripts(&host).await {
            Ok(scripts) => scripts,
            Err(e) => {
                warn!(caller = %caller, host = %host.name, error = %e, "Listing scripts failed");
                return self.fail(caller, reply::LIST_FAILED);
            }
        };

        if scripts.is_empty() {
            info!(caller = %caller, host = %host.name, "Host offers no scripts");
            return self.fail(caller, reply::NO_SCRIPTS);
        }

        let choices = scripts.iter().map(|s| Choice::script(s)).collect();
        if let Err(e) = session.choose_host(host, scripts) {
            warn!(caller = %caller, error = %e, "Host selection rejected");
            return self.fail(caller, reply::LIST_FAILED);
        }
        self.sessions.store(caller, session);

        Reply::with_choices(reply::SCRIPT_PROMPT, choices, Phase::AwaitingScript)
    }

    async fn on_awaiting_script(
        &self,
        caller: &str,
        mut session: SelectionSession,
        input: Input,
    ) -> Reply {
        let script = match input {
            Input::ChooseScript(name) => name,
            _ => return Reply::rejected(session.phase()),
        };

        // Re-check both selections at the moment of use
        let host = match session.host().and_then(|h| self.hosts.find(&h.name)) {
            Some(host) => host.clone(),
            None => {
                warn!(caller = %caller, "Chosen host is no longer configured");
                return self.fail(caller, reply::HOST_NOT_FOUND);
            }
        };

        if let Err(e) = session.choose_script(script.clone()) {
            warn!(caller = %caller, script = %script, error = %e, "Stale script selection");
            return self.fail(caller, reply::SCRIPT_NOT_FOUND);
        }

        let running = reply::running(&script, &host.name);
        let outcome = match self.endpoint.run_script(&host, &script).await {
            Ok(result) => {
                info!(
                    caller = %caller,
                    host = %host.name,
                    script = %script,
                    return_code = result.return_code,
                    "Script run delivered"
                );
                render_result(&result)
            }
            Err(e) => {
                warn!(
                    caller = %caller,
                    host = %host.name,
                    script = %script,
                    error = %e,
                    "Running script failed"
                );
                reply::RUN_FAILED.to_string()
            }
        };

        // Completed sessions are not kept; the next input starts over
        self.sessions.evict(caller);

        Reply {
            messages: vec![running, outcome],
            choices: Vec::new(),
            phase: session.phase(),
        }
    }

    fn fail(&self, caller: &str, message: &str) -> Reply {
        self.sessions.evict(caller);
        Reply::text(message, Phase::AwaitingHost)
    }
}
