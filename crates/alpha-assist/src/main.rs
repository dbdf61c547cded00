// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alpha-Assist - an intent-classifying help desk assistant.
//!
//! This is the binary entry point.

mod doctor;
mod render;
mod shell;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alpha_config::{AssistConfig, ConfigError};
use alpha_conversation::{ConversationOptions, ConversationState, RejectReason, SubmitOutcome};
use alpha_core::{AlphaError, KnowledgeBase};
use alpha_gemini::GeminiProvider;
use clap::{Parser, Subcommand};
use colored::Colorize;

/// Alpha-Assist - answers course questions from a knowledge base and
/// falls back to web search when unsure.
#[derive(Parser, Debug)]
#[command(name = "alpha-assist", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (default).
    Chat,
    /// Classify a single question and print the reply.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        query: Vec<String>,
        /// Run the web search automatically when the question is out of scope.
        #[arg(long)]
        search: bool,
    },
    /// Show the intent categories the assistant knows about.
    Intents {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Check configuration, credentials and the knowledge base.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Doctor { plain }) = cli.command {
        doctor::run_doctor(cli.config.as_deref(), plain).await;
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            alpha_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => shell::run_chat(config).await,
        Commands::Ask { query, search } => run_ask(config, &query.join(" "), search).await,
        Commands::Intents { json, plain } => run_intents(&config, json, plain),
        Commands::Doctor { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<AssistConfig, Vec<ConfigError>> {
    match path {
        Some(path) => alpha_config::load_and_validate_path(path),
        None => alpha_config::load_and_validate(),
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence. Logs go to stderr so they never interleave
/// with chat output on stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("alpha={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configured FAQ file, or the built-in knowledge base when none is set.
pub(crate) fn load_knowledge(config: &AssistConfig) -> Result<KnowledgeBase, AlphaError> {
    match config.knowledge.faq_file.as_deref() {
        Some(path) => KnowledgeBase::load(Path::new(path)),
        None => Ok(KnowledgeBase::builtin()),
    }
}

/// Wires the Gemini adapters into a fresh conversation.
fn build_conversation(
    config: &AssistConfig,
    knowledge: &KnowledgeBase,
    options: ConversationOptions,
) -> ConversationState {
    let provider = Arc::new(GeminiProvider::new(config, knowledge));
    ConversationState::new(provider.clone(), provider, options)
}

fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

async fn run_ask(config: AssistConfig, query: &str, search: bool) -> Result<(), AlphaError> {
    let knowledge = load_knowledge(&config)?;
    let options = ConversationOptions {
        welcome_message: None,
        ..ConversationOptions::from_config(&config)
    };
    let state = build_conversation(&config, &knowledge, options);
    let color = use_color(false);

    match state.submit(query).await {
        SubmitOutcome::Answered { reply, .. } => {
            if let Some(message) = state.message(&reply) {
                println!("{}", render::render_message(&message, color));
            }
        }
        SubmitOutcome::Rejected(RejectReason::Empty) => {
            return Err(AlphaError::Internal("the question must not be empty".into()));
        }
        SubmitOutcome::Rejected(RejectReason::Busy) => {
            return Err(AlphaError::Internal(
                "a classification is already in progress".into(),
            ));
        }
    }

    if search && let Some(suggestion) = state.last_search_offer() {
        let before = state.len();
        state.trigger_search(&suggestion).await;
        for message in state.snapshot().iter().skip(before) {
            println!("{}", render::render_message(message, color));
        }
    }

    Ok(())
}

fn run_intents(config: &AssistConfig, json: bool, plain: bool) -> Result<(), AlphaError> {
    let knowledge = load_knowledge(config)?;
    if json {
        let value = render::intents_json(&knowledge, config);
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| AlphaError::Internal(format!("failed to encode intents: {e}")))?;
        println!("{text}");
    } else {
        print!("{}", render::render_intents(&knowledge, config, use_color(plain)));
    }
    Ok(())
}
