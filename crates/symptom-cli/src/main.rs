use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use symptom_core::{ConversationSession, Message, MessageRole, Relay};
use symptom_http::RelayClient;
use tracing::warn;
use tracing_subscriber::EnvFilter;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

#[derive(Parser)]
#[command(name = "symptom-chat")]
#[command(about = "Describe your symptoms to the AI doctor from a terminal", long_about = None)]
struct Cli {
    /// Base URL of a running relay server
    #[arg(long, env = "RELAY_URL", default_value = "http://localhost:8000")]
    relay_url: String,
}

enum Command {
    Quit,
    NewChat,
    Say(String),
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/new" => Command::NewChat,
        text => Command::Say(text.to_string()),
    }
}

fn format_message(message: &Message) -> String {
    let (color, label) = match message.role {
        MessageRole::User => (GREEN, "You"),
        MessageRole::Assistant => (BLUE, "Doctor"),
        MessageRole::Error => (RED, "Error"),
    };
    format!("{color}{label}:{RESET} {}", message.content)
}

/// Prints messages from `from` onward and returns the new high-water mark.
fn render(session: &ConversationSession, from: usize) -> usize {
    let messages = session.messages();
    for message in messages.iter().skip(from) {
        println!("{}\n", format_message(message));
    }
    messages.len()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let cli = Cli::parse();
    let relay = RelayClient::new(&cli.relay_url);

    let configured = match relay.health().await {
        Ok(health) => health.upstream_configured,
        Err(e) => {
            warn!("Relay at {} is not reachable: {}", cli.relay_url, e);
            false
        }
    };

    let mut session = ConversationSession::new();
    session.initialize(configured);
    let mut printed = render(&session, 0);

    if !configured {
        return Ok(());
    }

    println!("{DIM}/new starts a new chat, /quit exits{RESET}\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };

        match parse_command(&line?) {
            Command::Quit => break,
            Command::NewChat => {
                session.reset();
                printed = render(&session, 0);
            }
            Command::Say(text) => {
                let Some(request) = session.begin(&text) else { continue };
                // the typed line is already on screen
                printed += 1;

                println!("{DIM}…{RESET}");
                let result = relay.send(&request).await;
                session.finish(result);
                printed = render(&session, printed);
            }
        }
    }

    Ok(())
}
