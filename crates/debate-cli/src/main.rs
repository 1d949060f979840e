//! Debate Arena CLI
//!
//! Runs proponent/opponent debates against a chat-completion gateway and
//! renders transcripts and judge verdicts in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List style profiles
//! debate-cli styles
//!
//! # Full debate with a verdict
//! OPENAI_API_KEY=sk-... debate-cli debate --topic "Cities should ban cars" --rounds 3 --judge
//!
//! # Through the forwarding function instead of the API directly
//! ARENA_GATEWAY_KIND=proxy ARENA_GATEWAY_URL=https://.../llm-experiment debate-cli debate --topic "..."
//!
//! # Render a saved verdict
//! debate-cli verdict --file verdict.txt
//! ```

mod render;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use arena::config::ArenaConfig;
use arena::debate::{DebateOrchestrator, Round, PROFILES};
use arena::format::{parse_verdict, ParsedVerdict};
use arena::gateway;
use arena::langflow::{AssistantChat, LangflowClient};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file (environment variables still take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colours
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available style profiles
    Styles,
    /// Run a debate
    Debate(DebateArgs),
    /// Parse and render a verdict from a file or stdin
    Verdict {
        /// Read from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the parsed sections as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Send one message to the assistant chat flow
    Ask {
        message: String,
    },
}

#[derive(Args, Debug)]
struct DebateArgs {
    /// Debate topic
    #[arg(long)]
    topic: String,

    /// Style profile identifier
    #[arg(long, default_value = "baseline")]
    style: String,

    /// Total rounds to play (capped at the configured maximum)
    #[arg(long)]
    rounds: Option<usize>,

    /// Request a judge verdict after the last round
    #[arg(long, default_value_t = false)]
    judge: bool,

    /// Print the transcript as JSON instead of formatted text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct DebateReport<'a> {
    topic: &'a str,
    profile: &'a str,
    rounds: &'a [Round],
    verdict: Option<&'a str>,
    parsed_verdict: Option<ParsedVerdict>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stdout().is_terminal();
    let config = ArenaConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Styles => {
            for p in PROFILES {
                println!("{:<14} {}", p.id, p.label);
            }
            Ok(())
        }
        Command::Debate(args) => run_debate(config, args, color).await,
        Command::Verdict { file, json } => show_verdict(file, json, color),
        Command::Ask { message } => ask(config, &message).await,
    }
}

async fn run_debate(config: ArenaConfig, args: DebateArgs, color: bool) -> Result<()> {
    let gateway = gateway::from_config(&config.gateway).context("Failed to build chat gateway")?;
    info!(
        gateway = gateway.name(),
        model = %config.gateway.model,
        "Debate starting"
    );

    let max = config.debate.max_rounds;
    let target = args.rounds.unwrap_or(1).clamp(1, max);
    let mut orchestrator = DebateOrchestrator::with_config(gateway, config.debate);

    orchestrator
        .start(&args.topic, &args.style)
        .await
        .context("Failed to start debate")?;
    if !args.json {
        print_last_round(&orchestrator, color);
    }

    while orchestrator.transcript().len() < target {
        orchestrator
            .continue_round()
            .await
            .with_context(|| format!("Round {} failed", orchestrator.transcript().len() + 1))?;
        if !args.json {
            print_last_round(&orchestrator, color);
        }
    }

    if args.judge {
        orchestrator
            .request_verdict()
            .await
            .context("Failed to get verdict")?;
    }

    if args.json {
        let report = DebateReport {
            topic: orchestrator.topic(),
            profile: orchestrator.profile().id,
            rounds: orchestrator.transcript().rounds(),
            verdict: orchestrator.verdict(),
            parsed_verdict: orchestrator.verdict().map(parse_verdict),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(text) = orchestrator.verdict() {
        println!("{}", render::render_verdict(&parse_verdict(text), color));
    }
    eprintln!("{}", orchestrator.transcript().status_line());
    Ok(())
}

fn print_last_round(orchestrator: &DebateOrchestrator, color: bool) {
    let transcript = orchestrator.transcript();
    if let Some(round) = transcript.last() {
        println!("{}", render::render_round(transcript.len(), round, color));
    }
}

fn show_verdict(file: Option<PathBuf>, json: bool, color: bool) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    let parsed = parse_verdict(&text);
    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("{}", render::render_verdict(&parsed, color));
    }
    Ok(())
}

async fn ask(config: ArenaConfig, message: &str) -> Result<()> {
    let client = LangflowClient::from_config(&config.langflow)
        .context("Failed to build Langflow client")?;
    let mut chat = AssistantChat::new(Box::new(client));
    let reply = chat.send(message).await.context("Assistant request failed")?;
    println!("{reply}");
    if let Some(session) = chat.session_id() {
        info!(session, "assistant session");
    }
    Ok(())
}
