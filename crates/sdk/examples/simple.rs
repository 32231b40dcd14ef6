//! Simple SDK Example
//!
//! Lists the scripts on an endpoint and runs the first one.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    RELAY_SCRIPTS_DIR=./scripts cargo run --package relay-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package relay-sdk --example simple
//!    ```

use relay_sdk::RelayClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());

    println!("Script Relay SDK - Simple Example");
    println!("=================================\n");

    let client = RelayClient::connect(&url)?;
    let health = client.health().await?;
    println!("Endpoint {} is {} (v{})\n", url, health.status, health.version);

    let scripts = client.list_scripts().await?;
    if scripts.is_empty() {
        println!("No scripts available.");
        return Ok(());
    }

    println!("Available scripts:");
    for name in &scripts {
        println!("  - {}", name);
    }

    let name = &scripts[0];
    println!("\nRunning '{}'...", name);
    let result = client.run_script(name.as_str()).await?;

    if !result.output.is_empty() {
        println!("Output:\n{}", result.output);
    }
    if !result.error.is_empty() {
        println!("Errors:\n{}", result.error);
    }
    println!("Exit code: {}", result.return_code);

    Ok(())
}
