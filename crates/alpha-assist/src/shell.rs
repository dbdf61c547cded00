// SPDX-FileCopyrightText: 2026 Alpha-Assist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `alpha-assist chat` command implementation.
//!
//! Interactive REPL with colored output and readline history. Plain lines
//! are classified; slash commands drive the web search fallback and views.
//! Ctrl+C while a request is in flight cancels it instead of exiting.

use std::future::Future;

use alpha_config::AssistConfig;
use alpha_conversation::{
    ConversationOptions, ConversationState, RejectReason, SearchOutcome, SubmitOutcome,
};
use alpha_core::AlphaError;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::render;

/// A parsed line of chat input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Help,
    History,
    Intents,
    /// `/search` with no argument: run the pending suggestion.
    SearchOffer,
    Search(&'a str),
    Unknown(&'a str),
    Query(&'a str),
    Blank,
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Query(trimmed);
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "quit" | "exit" => Input::Quit,
        "help" => Input::Help,
        "history" => Input::History,
        "intents" => Input::Intents,
        "search" if rest.is_empty() => Input::SearchOffer,
        "search" => Input::Search(rest),
        _ => Input::Unknown(trimmed),
    }
}

/// Runs `future`, cancelling the conversation's in-flight calls on Ctrl+C.
///
/// The cancelled call still completes through its failure path, so the
/// output is always returned.
async fn interruptible<F: Future>(state: &ConversationState, future: F) -> F::Output {
    tokio::pin!(future);
    tokio::select! {
        output = &mut future => output,
        _ = tokio::signal::ctrl_c() => {
            info!("request interrupted by user");
            state.cancel_pending();
            future.await
        }
    }
}

/// Prints every message appended since `printed` and advances it.
fn print_new(state: &ConversationState, printed: &mut usize, color: bool) {
    let log = state.snapshot();
    for message in log.iter().skip(*printed) {
        println!("{}\n", render::render_message(message, color));
    }
    *printed = log.len();
}

fn print_help() {
    println!("  {}  ask a question", "<text>".yellow());
    println!("  {}  search the web for the last suggestion", "/search".yellow());
    println!("  {}  search the web for <text>", "/search <text>".yellow());
    println!("  {}  show the conversation so far", "/history".yellow());
    println!("  {}  show the intent categories", "/intents".yellow());
    println!("  {}  leave (also /exit, Ctrl+D)", "/quit".yellow());
    println!("  Press Ctrl+C while waiting for a reply to cancel it.\n");
}

/// Runs the `alpha-assist chat` interactive REPL.
pub async fn run_chat(config: AssistConfig) -> Result<(), AlphaError> {
    let knowledge = crate::load_knowledge(&config)?;
    let options = ConversationOptions::from_config(&config);
    let state = crate::build_conversation(&config, &knowledge, options);
    let color = crate::use_color(false);

    let mut rl = DefaultEditor::new()
        .map_err(|e| AlphaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.agent.name.bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );

    let mut printed = 0;
    print_new(&state, &mut printed, color);

    let prompt = format!("{}> ", "you".blue());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let input = parse_input(&line);
        if !matches!(input, Input::Blank) {
            let _ = rl.add_history_entry(line.as_str());
        }
        debug!(?input, "chat input");

        match input {
            Input::Quit => break,
            Input::Blank => continue,
            Input::Help => print_help(),
            Input::History => {
                for message in state.snapshot() {
                    println!("{}\n", render::render_message(&message, color));
                }
            }
            Input::Intents => print!("{}", render::render_intents(&knowledge, &config, color)),
            Input::Unknown(command) => {
                println!("{} {command}. Type /help.", "unknown command".yellow());
            }
            Input::SearchOffer => match state.last_search_offer() {
                Some(query) => search(&state, &query, &mut printed, color).await,
                None => println!(
                    "{}",
                    "No search suggestion yet. Use /search <text> to search directly.".dimmed()
                ),
            },
            Input::Search(query) => search(&state, query, &mut printed, color).await,
            Input::Query(text) => {
                println!("{}", "thinking...".dimmed());
                match interruptible(&state, state.submit(text)).await {
                    SubmitOutcome::Answered { .. } => {
                        // The user line is already on screen.
                        printed += 1;
                        print_new(&state, &mut printed, color);
                    }
                    SubmitOutcome::Rejected(RejectReason::Busy) => {
                        println!("{}", "Still working on your last question.".yellow());
                    }
                    SubmitOutcome::Rejected(RejectReason::Empty) => {}
                }
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

async fn search(state: &ConversationState, query: &str, printed: &mut usize, color: bool) {
    println!("{}", format!("searching the web for \"{query}\"...").dimmed());
    match interruptible(state, state.trigger_search(query)).await {
        SearchOutcome::Appended(_) | SearchOutcome::Failed { surfaced: Some(_) } => {
            print_new(state, printed, color);
        }
        SearchOutcome::Failed { surfaced: None } => {
            println!("{}", "Search failed; see the log for details.".dimmed());
        }
        SearchOutcome::Ignored => {
            println!("{}", "A search is already running.".yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_query() {
        assert_eq!(parse_input("  How do I pay? "), Input::Query("How do I pay?"));
    }

    #[test]
    fn blank_lines() {
        assert_eq!(parse_input(""), Input::Blank);
        assert_eq!(parse_input("   \t"), Input::Blank);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input("/exit"), Input::Quit);
        assert_eq!(parse_input("/help"), Input::Help);
        assert_eq!(parse_input("/history"), Input::History);
        assert_eq!(parse_input("/intents"), Input::Intents);
    }

    #[test]
    fn search_with_and_without_query() {
        assert_eq!(parse_input("/search"), Input::SearchOffer);
        assert_eq!(parse_input("/search   "), Input::SearchOffer);
        assert_eq!(
            parse_input("/search  weather in Paris "),
            Input::Search("weather in Paris")
        );
    }

    #[test]
    fn cancel_is_not_a_slash_command() {
        // Ctrl+C is the only way to cancel a pending reply.
        assert_eq!(parse_input("/cancel"), Input::Unknown("/cancel"));
    }

    #[test]
    fn unknown_command_keeps_text() {
        assert_eq!(parse_input("/frobnicate now"), Input::Unknown("/frobnicate now"));
    }
}
