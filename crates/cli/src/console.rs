//! Line-oriented front-end for the selection protocol
//!
//! Accepts `/start`, the number of an offered choice, or a raw action
//! (`server:<name>`, `script:<name>`). `quit` or EOF leaves.

use anyhow::{Context, Result};
use colored::Colorize;
use relay_core::application::selection::Choice;
use relay_core::application::{HostCatalog, Reply, SelectionProtocol};
use relay_sdk::HttpExecutionEndpoint;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One console is one caller
const CONSOLE_CALLER: &str = "console";

pub async fn run(catalog: HostCatalog, timeout: Duration) -> Result<()> {
    let endpoint = HttpExecutionEndpoint::new(timeout)?;
    let protocol = SelectionProtocol::new(Arc::new(catalog), Arc::new(endpoint));

    println!(
        "{}",
        "Script Relay console. Type /start to begin, quit to leave."
            .cyan()
            .bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut offered: Vec<Choice> = Vec::new();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        let input = resolve_choice(line, &offered);
        let reply = protocol.handle_text(CONSOLE_CALLER, &input).await;
        print_reply(&reply);
        offered = reply.choices;
    }

    Ok(())
}

/// Numbers pick from the last offered choices; anything else passes through
fn resolve_choice(line: &str, offered: &[Choice]) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| offered.get(i))
        .map(|choice| choice.action.clone())
        .unwrap_or_else(|| line.to_string())
}

fn print_reply(reply: &Reply) {
    for message in &reply.messages {
        println!("{}", message);
    }
    for (i, choice) in reply.choices.iter().enumerate() {
        println!("  [{}] {}", (i + 1).to_string().bold(), choice.label);
    }
}

fn prompt() -> Result<()> {
    print!("{} ", ">".green().bold());
    std::io::stdout().flush().context("Failed to flush stdout")
}
