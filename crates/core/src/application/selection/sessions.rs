// Session Map - per-caller selection state

use crate::domain::{CallerId, SelectionSession};
use std::collections::HashMap;
use std::sync::Mutex;

/// Sessions keyed by caller.
///
/// The lock guards only map access and is never held across an await;
/// callers work on a copy and write it back. A caller without an entry is
/// at the start of a fresh session.
#[derive(Default)]
pub struct SessionMap {
    inner: Mutex<HashMap<CallerId, SelectionSession>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session for `caller`, or a fresh one
    pub fn get(&self, caller: &str) -> SelectionSession {
        self.lock().get(caller).cloned().unwrap_or_default()
    }

    pub fn store(&self, caller: &str, session: SelectionSession) {
        self.lock().insert(caller.to_string(), session);
    }

    /// Drop the caller's session; returns whether one existed
    pub fn evict(&self, caller: &str) -> bool {
        self.lock().remove(caller).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CallerId, SelectionSession>> {
        // A panic while holding the guard cannot leave a half-written entry
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
