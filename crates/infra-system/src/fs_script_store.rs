// Directory-backed script store
// Scripts are `*.sh` regular files directly inside one root directory
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use relay_core::domain::{ScriptName, ScriptRef};
use relay_core::port::script_store::parse_name;
use relay_core::port::{ScriptStore, StoreError};

/// Script store rooted at a directory
///
/// The root is canonicalized once at construction. Every path handed out
/// lies inside it: names are single validated components, and symlinks are
/// followed only when their target stays within the root.
pub struct FsScriptStore {
    root: PathBuf,
}

impl FsScriptStore {
    /// Open the store, failing if the root is missing or not a directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let canonical = std::fs::canonicalize(root).map_err(|e| {
            StoreError::Io(format!("script root {}: {}", root.display(), e))
        })?;

        if !canonical.is_dir() {
            return Err(StoreError::Io(format!(
                "script root {} is not a directory",
                canonical.display()
            )));
        }

        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look at one candidate entry; `None` if it is not a runnable script
    async fn inspect(&self, name: ScriptName) -> Result<Option<ScriptRef>, StoreError> {
        let path = self.root.join(name.as_str());

        let meta = match tokio::fs::symlink_metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(classify(e)),
        };

        if meta.is_file() {
            return Ok(Some(ScriptRef::new(name, path)));
        }

        if meta.file_type().is_symlink() {
            let target = match tokio::fs::canonicalize(&path).await {
                Ok(target) => target,
                // Dangling link
                Err(_) => return Ok(None),
            };
            if target == self.root || !target.starts_with(&self.root) {
                debug!(script = %name, target = %target.display(), "Ignoring symlink leaving script root");
                return Ok(None);
            }
            let is_file = tokio::fs::metadata(&target)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                return Ok(Some(ScriptRef::new(name, target)));
            }
        }

        Ok(None)
    }
}

/// Transient conditions become `Unavailable`, everything else `Io`
fn classify(e: io::Error) -> StoreError {
    match e.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            StoreError::Unavailable(e.to_string())
        }
        _ => StoreError::Io(e.to_string()),
    }
}

#[async_trait]
impl ScriptStore for FsScriptStore {
    async fn list(&self) -> Result<Vec<ScriptRef>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(classify)?;
        let mut scripts = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(classify)? {
            let Ok(file_name) = entry.file_name().into_string() else {
                continue;
            };
            let Ok(name) = ScriptName::parse(file_name) else {
                continue;
            };
            if !name.has_script_extension() {
                continue;
            }
            if let Some(script) = self.inspect(name).await? {
                scripts.push(script);
            }
        }

        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    }

    async fn resolve(&self, name: &str) -> Result<ScriptRef, StoreError> {
        let name = parse_name(name)?;
        if !name.has_script_extension() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let display = name.to_string();
        self.inspect(name)
            .await?
            .ok_or(StoreError::NotFound(display))
    }
}
