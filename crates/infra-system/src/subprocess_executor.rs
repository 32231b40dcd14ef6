// Subprocess executor implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{info, warn};

use relay_core::domain::{ExecutionResult, ScriptRef};
use relay_core::port::{ExecutionError, ExecutionLimits, ScriptExecutor, TimeProvider};

/// Default interpreter every script is run under
pub const INTERPRETER: &str = "sh";

/// Return code reported when the platform gives neither a code nor a signal
const UNKNOWN_RETURN_CODE: i32 = -1;

/// Subprocess executor
/// Runs `sh <script>` with stdin closed and both output streams captured
pub struct SubprocessExecutor {
    time_provider: Arc<dyn TimeProvider>,
    limits: ExecutionLimits,
    interpreter: PathBuf,
}

impl SubprocessExecutor {
    /// Create a new subprocess executor
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    /// * `limits` - Optional timeout / output ceiling (`ExecutionLimits::unbounded()` for none)
    ///
    /// # Example
    /// ```ignore
    /// let executor = SubprocessExecutor::new(
    ///     Arc::new(SystemTimeProvider),
    ///     ExecutionLimits::unbounded(),
    /// );
    /// ```
    pub fn new(time_provider: Arc<dyn TimeProvider>, limits: ExecutionLimits) -> Self {
        Self {
            time_provider,
            limits,
            interpreter: PathBuf::from(INTERPRETER),
        }
    }

    /// Run scripts under `interpreter` instead of `sh`
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn limits(&self) -> ExecutionLimits {
        self.limits
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Spawn the interpreter and collect both streams plus the exit status
    async fn spawn_and_wait(
        &self,
        script: &ScriptRef,
    ) -> Result<(Vec<u8>, Vec<u8>, ExitStatus), ExecutionError> {
        let mut child = Command::new(&self.interpreter)
            .arg(script.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionError::SpawnFailed(e.to_string()))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let cap = self.limits.max_output_bytes;

        // Drain both pipes while waiting so a chatty child never blocks
        let collect = async {
            tokio::try_join!(
                read_stream(stdout, cap),
                read_stream(stderr, cap),
                child.wait(),
            )
        };

        let collected = match self.limits.timeout {
            Some(limit) => match tokio::time::timeout(limit, collect).await {
                Ok(collected) => collected,
                // `child` is killed on drop
                Err(_) => return Err(ExecutionError::Timeout(limit.as_millis() as u64)),
            },
            None => collect.await,
        };

        collected.map_err(|e| ExecutionError::ExecutionFault(e.to_string()))
    }
}

/// Read a whole stream; past `cap` bytes the rest is read and discarded
async fn read_stream<R: AsyncRead + Unpin>(
    handle: Option<R>,
    cap: Option<usize>,
) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let Some(mut handle) = handle else {
        return Ok(buf);
    };

    match cap {
        None => {
            handle.read_to_end(&mut buf).await?;
        }
        Some(cap) => {
            (&mut handle).take(cap as u64).read_to_end(&mut buf).await?;
            let dropped = tokio::io::copy(&mut handle, &mut tokio::io::sink()).await?;
            if dropped > 0 {
                warn!(kept = buf.len(), dropped, "Script output truncated");
            }
        }
    }

    Ok(buf)
}

/// Raw exit code; a child killed by signal N reports -N
fn return_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    UNKNOWN_RETURN_CODE
}

#[async_trait]
impl ScriptExecutor for SubprocessExecutor {
    async fn execute(&self, script: &ScriptRef) -> Result<ExecutionResult, ExecutionError> {
        let start_time = self.time_provider.now_millis();

        info!(
            script = %script.name,
            path = %script.path().display(),
            timeout = ?self.limits.timeout,
            "Starting script execution"
        );

        let (stdout, stderr, status) = self.spawn_and_wait(script).await.map_err(|e| {
            warn!(script = %script.name, error = %e, "Script execution failed");
            e
        })?;

        let result = ExecutionResult::from_raw(&stdout, &stderr, return_code(status));
        let duration_ms = self.time_provider.elapsed_millis(start_time);

        info!(
            script = %script.name,
            duration_ms = %duration_ms,
            return_code = result.return_code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "Script execution completed"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::domain::ScriptName;
    use relay_core::port::time_provider::SystemTimeProvider;
    use std::path::Path;
    use std::time::Duration;

    fn write_script(dir: &Path, name: &str, body: &str) -> ScriptRef {
        let path = dir.join(name);
        std::fs::write(&path, body).expect("write script");
        ScriptRef::new(ScriptName::parse(name).expect("name"), path)
    }

    fn executor(limits: ExecutionLimits) -> SubprocessExecutor {
        SubprocessExecutor::new(Arc::new(SystemTimeProvider), limits)
    }

    #[tokio::test]
    async fn test_execute_hello() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "hello.sh", "printf hello\n");

        let result = executor(ExecutionLimits::unbounded())
            .execute(&script)
            .await
            .unwrap();

        assert_eq!(
            result,
            ExecutionResult {
                output: "hello".to_string(),
                error: String::new(),
                return_code: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "hello.sh", "echo hello\n");
        let executor = executor(ExecutionLimits::unbounded())
            .with_interpreter(dir.path().join("no-such-shell"));

        let result = executor.execute(&script).await;

        assert!(
            matches!(result, Err(ExecutionError::SpawnFailed(_))),
            "got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_custom_interpreter_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "hello.sh", "echo hello\n");
        let executor = executor(ExecutionLimits::unbounded()).with_interpreter("/bin/sh");
        assert_eq!(executor.interpreter(), Path::new("/bin/sh"));

        let result = executor.execute(&script).await.unwrap();

        assert_eq!(result.output, "hello\n");
    }

    #[tokio::test]
    async fn test_execute_silent_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "seven.sh", "exit 7\n");

        let result = executor(ExecutionLimits::unbounded())
            .execute(&script)
            .await
            .unwrap();

        assert_eq!(result.output, "");
        assert_eq!(result.error, "");
        assert_eq!(result.return_code, 7);
    }

    #[tokio::test]
    async fn test_execute_captures_stderr_separately() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "both.sh", "echo out\necho err >&2\nexit 3\n");

        let result = executor(ExecutionLimits::unbounded())
            .execute(&script)
            .await
            .unwrap();

        assert_eq!(result.output, "out\n");
        assert_eq!(result.error, "err\n");
        assert_eq!(result.return_code, 3);
    }

    #[tokio::test]
    async fn test_execute_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "bytes.sh", "printf 'ok \\377\\376 end'\n");

        let result = executor(ExecutionLimits::unbounded())
            .execute(&script)
            .await
            .unwrap();

        assert!(result.output.starts_with("ok "));
        assert!(result.output.ends_with(" end"));
        assert!(result.output.contains('\u{FFFD}'));
        assert_eq!(result.return_code, 0);
    }

    #[tokio::test]
    async fn test_execute_stdin_is_closed() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "stdin.sh", "cat\necho done\n");

        let result = executor(ExecutionLimits::unbounded())
            .execute(&script)
            .await
            .unwrap();

        assert_eq!(result.output, "done\n");
    }

    #[tokio::test]
    async fn test_execute_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "slow.sh", "sleep 10\n");

        let result = executor(ExecutionLimits {
            timeout: Some(Duration::from_millis(200)),
            max_output_bytes: None,
        })
        .execute(&script)
        .await;

        assert!(matches!(result, Err(ExecutionError::Timeout(200))));
    }

    #[tokio::test]
    async fn test_execute_output_cap_keeps_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "chatty.sh",
            "i=0\nwhile [ $i -lt 2000 ]; do echo 0123456789; i=$((i+1)); done\necho tail >&2\n",
        );

        let result = executor(ExecutionLimits {
            timeout: Some(Duration::from_secs(10)),
            max_output_bytes: Some(16),
        })
        .execute(&script)
        .await
        .unwrap();

        assert_eq!(result.output, "0123456789\n01234");
        assert_eq!(result.error, "tail\n");
        assert_eq!(result.return_code, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_killed_by_signal_is_negative() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "suicide.sh", "kill -9 $$\n");

        let result = executor(ExecutionLimits::unbounded())
            .execute(&script)
            .await
            .unwrap();

        assert_eq!(result.return_code, -9);
    }
}
