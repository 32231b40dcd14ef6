//! Loopback endpoint fixture shared by the end-to-end tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use relay_api_http::{HttpServer, HttpServerConfig, HttpServerHandle};
use relay_core::application::RelayService;
use relay_core::port::time_provider::SystemTimeProvider;
use relay_core::port::ExecutionLimits;
use relay_infra_system::{FsScriptStore, SubprocessExecutor};
use tempfile::TempDir;

/// A running endpoint over a temporary scripts directory
pub struct TestEndpoint {
    pub dir: TempDir,
    pub handle: HttpServerHandle,
}

impl TestEndpoint {
    pub async fn start(scripts: &[(&str, &str)]) -> Self {
        Self::start_with_limits(scripts, ExecutionLimits::unbounded()).await
    }

    pub async fn start_with_limits(scripts: &[(&str, &str)], limits: ExecutionLimits) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in scripts {
            write_script(dir.path(), name, body);
        }

        let store = FsScriptStore::open(dir.path()).unwrap();
        let executor = SubprocessExecutor::new(Arc::new(SystemTimeProvider), limits);
        let service = Arc::new(RelayService::new(Arc::new(store), Arc::new(executor)));

        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let handle = HttpServer::new(config, service).start().await.unwrap();

        Self { dir, handle }
    }

    pub fn base_url(&self) -> String {
        self.handle.base_url()
    }

    pub fn write_script(&self, name: &str, body: &str) {
        write_script(self.dir.path(), name, body);
    }

    pub fn remove_script(&self, name: &str) {
        fs::remove_file(self.dir.path().join(name)).unwrap();
    }

    pub async fn stop(self) {
        self.handle.stop().await.unwrap();
    }
}

pub fn write_script(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}
