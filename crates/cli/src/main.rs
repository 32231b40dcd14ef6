//! Script Relay CLI - list and run scripts on configured hosts

mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use relay_core::application::selection::render_result;
use relay_core::application::HostCatalog;
use relay_core::domain::Host;
use relay_sdk::RelayClient;
use std::path::PathBuf;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

const DEFAULT_HOSTS_FILE: &str = "servers_api.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "300";

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Script Relay CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with the configured hosts: [{"name": ..., "base_url": ...}]
    #[arg(long, env = "RELAY_HOSTS_FILE", default_value = DEFAULT_HOSTS_FILE)]
    hosts_file: String,

    /// Per-request timeout in seconds; a run blocks until the script exits
    #[arg(long, env = "RELAY_REQUEST_TIMEOUT_SECS", default_value = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configured hosts
    Hosts,

    /// List the scripts on a host
    List {
        /// Host name from the hosts file
        #[arg(long)]
        host: String,
    },

    /// Run a script on a host
    Run {
        /// Host name from the hosts file
        #[arg(long)]
        host: String,

        /// Script name (e.g., backup.sh)
        script: String,
    },

    /// Interactive host -> script selection
    Console,
}

#[derive(Tabled)]
struct HostRow {
    name: String,
    base_url: String,
}

impl From<&Host> for HostRow {
    fn from(host: &Host) -> Self {
        Self {
            name: host.name.clone(),
            base_url: host.base_url.clone(),
        }
    }
}

fn load_hosts(raw_path: &str) -> Result<HostCatalog> {
    let path = PathBuf::from(shellexpand::tilde(raw_path).into_owned());
    HostCatalog::load(&path).with_context(|| format!("Failed to load hosts from {}", raw_path))
}

fn find_host<'a>(catalog: &'a HostCatalog, name: &str) -> Result<&'a Host> {
    catalog
        .find(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown host '{}'. See `relay hosts`", name))
}

/// Process exit status for a script return code; signals follow the shell's 128+N
fn exit_status(return_code: i32) -> i32 {
    if return_code < 0 {
        128 + return_code.saturating_neg()
    } else {
        return_code
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Library diagnostics only; user-facing output goes to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_hosts(&cli.hosts_file)?;
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Hosts => {
            if catalog.is_empty() {
                println!("{}", "No hosts configured".yellow());
                return Ok(());
            }
            let rows: Vec<HostRow> = catalog.hosts().iter().map(HostRow::from).collect();
            println!("{}", Table::new(rows));
        }

        Commands::List { host } => {
            let host = find_host(&catalog, &host)?;
            let client = RelayClient::connect_with_timeout(&host.base_url, timeout)?;

            let scripts = client
                .list_scripts()
                .await
                .with_context(|| format!("Failed to list scripts on '{}'", host.name))?;

            if scripts.is_empty() {
                println!("{}", format!("No scripts on '{}'", host.name).yellow());
            } else {
                println!("{}", format!("Scripts on '{}':", host.name).cyan().bold());
                for name in scripts {
                    println!("  {} {}", "•".bold(), name);
                }
            }
        }

        Commands::Run { host, script } => {
            let host = find_host(&catalog, &host)?;
            let client = RelayClient::connect_with_timeout(&host.base_url, timeout)?;

            println!(
                "{}",
                format!("Running '{}' on '{}'...", script, host.name)
                    .cyan()
                    .bold()
            );

            let result = client
                .run_script(script.as_str())
                .await
                .with_context(|| format!("Failed to run '{}' on '{}'", script, host.name))?;

            println!("{}", render_result(&result));

            if !result.is_success() {
                std::process::exit(exit_status(result.return_code));
            }
        }

        Commands::Console => {
            console::run(catalog, timeout).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(7), 7);
        assert_eq!(exit_status(-9), 137);
        assert_eq!(exit_status(-15), 143);
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["relay", "--hosts-file", "h.json", "run", "--host", "web", "a.sh"])
            .unwrap();
        assert_eq!(cli.hosts_file, "h.json");
        match cli.command {
            Commands::Run { host, script } => {
                assert_eq!(host, "web");
                assert_eq!(script, "a.sh");
            }
            _ => panic!("expected run"),
        }
    }
}
