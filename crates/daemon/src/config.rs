//! Daemon configuration from environment variables

use anyhow::{bail, Context, Result};
use relay_api_http::HttpServerConfig;
use relay_core::port::ExecutionLimits;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_SCRIPTS_DIR: &str = "RELAY_SCRIPTS_DIR";
pub const ENV_HTTP_HOST: &str = "RELAY_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "RELAY_HTTP_PORT";
pub const ENV_EXEC_TIMEOUT_SECS: &str = "RELAY_EXEC_TIMEOUT_SECS";
pub const ENV_MAX_OUTPUT_BYTES: &str = "RELAY_MAX_OUTPUT_BYTES";
pub const ENV_INTERPRETER: &str = "RELAY_INTERPRETER";
pub const ENV_LOG_FORMAT: &str = "RELAY_LOG_FORMAT";
pub const ENV_LOG_DIR: &str = "RELAY_LOG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Daily rolling file sink, in addition to stdout
    pub dir: Option<PathBuf>,
}

/// Daemon configuration
///
/// | Env Var                   | Default      |
/// |---------------------------|--------------|
/// | `RELAY_SCRIPTS_DIR`       | (required)   |
/// | `RELAY_HTTP_HOST`         | `0.0.0.0`    |
/// | `RELAY_HTTP_PORT`         | `8000`       |
/// | `RELAY_EXEC_TIMEOUT_SECS` | no limit     |
/// | `RELAY_MAX_OUTPUT_BYTES`  | no limit     |
/// | `RELAY_INTERPRETER`       | `sh`         |
/// | `RELAY_LOG_FORMAT`        | `pretty`     |
/// | `RELAY_LOG_DIR`           | stdout only  |
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub scripts_dir: PathBuf,
    pub http: HttpServerConfig,
    pub limits: ExecutionLimits,
    /// Shell scripts run under; `None` keeps the executor default
    pub interpreter: Option<PathBuf>,
    pub log: LogConfig,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let scripts_dir = match var(ENV_SCRIPTS_DIR) {
            Some(dir) => expand_path(&dir),
            None => bail!("{} must be set to the scripts directory", ENV_SCRIPTS_DIR),
        };

        let defaults = HttpServerConfig::default();
        let http = HttpServerConfig {
            host: var(ENV_HTTP_HOST).unwrap_or(defaults.host),
            port: parse_opt(ENV_HTTP_PORT, var(ENV_HTTP_PORT))?.unwrap_or(defaults.port),
        };

        let limits = ExecutionLimits {
            timeout: parse_opt::<u64>(ENV_EXEC_TIMEOUT_SECS, var(ENV_EXEC_TIMEOUT_SECS))?
                .map(Duration::from_secs),
            max_output_bytes: parse_opt(ENV_MAX_OUTPUT_BYTES, var(ENV_MAX_OUTPUT_BYTES))?,
        };

        let interpreter = var(ENV_INTERPRETER).map(|i| expand_path(&i));

        let format = match var(ENV_LOG_FORMAT).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let log = LogConfig {
            format,
            dir: var(ENV_LOG_DIR).map(|d| expand_path(&d)),
        };

        Ok(Self {
            scripts_dir,
            http,
            limits,
            interpreter,
            log,
        })
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

fn parse_opt<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|v| {
        v.trim()
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value '{}'", key, v))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<DaemonConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DaemonConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_scripts_dir_is_required() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains(ENV_SCRIPTS_DIR));

        assert!(config(&[(ENV_SCRIPTS_DIR, "  ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[(ENV_SCRIPTS_DIR, "/srv/scripts")]).unwrap();

        assert_eq!(cfg.scripts_dir, PathBuf::from("/srv/scripts"));
        assert_eq!(cfg.http.host, "0.0.0.0");
        assert_eq!(cfg.http.port, 8000);
        assert_eq!(cfg.limits, ExecutionLimits::unbounded());
        assert!(cfg.interpreter.is_none());
        assert_eq!(cfg.log.format, LogFormat::Pretty);
        assert!(cfg.log.dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            (ENV_SCRIPTS_DIR, "/srv/scripts"),
            (ENV_HTTP_HOST, "127.0.0.1"),
            (ENV_HTTP_PORT, "9000"),
            (ENV_EXEC_TIMEOUT_SECS, "30"),
            (ENV_MAX_OUTPUT_BYTES, "65536"),
            (ENV_INTERPRETER, "/bin/bash"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_LOG_DIR, "/var/log/relay"),
        ])
        .unwrap();

        assert_eq!(cfg.http.host, "127.0.0.1");
        assert_eq!(cfg.http.port, 9000);
        assert_eq!(cfg.limits.timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.limits.max_output_bytes, Some(65536));
        assert_eq!(cfg.interpreter, Some(PathBuf::from("/bin/bash")));
        assert_eq!(cfg.log.format, LogFormat::Json);
        assert_eq!(cfg.log.dir, Some(PathBuf::from("/var/log/relay")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config(&[(ENV_SCRIPTS_DIR, "/srv"), (ENV_HTTP_PORT, "eighty")]).unwrap_err();
        assert!(err.to_string().contains(ENV_HTTP_PORT));
    }

    #[test]
    fn test_tilde_is_expanded() {
        let cfg = config(&[(ENV_SCRIPTS_DIR, "~/scripts")]).unwrap();
        assert!(!cfg.scripts_dir.starts_with("~"));
        assert!(cfg.scripts_dir.ends_with("scripts"));
    }
}
