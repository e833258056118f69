use std::io::{self, Write};

use anyhow::{Context, Result};
use campus_agents::CampusAssistant;
use campus_core::catalog::{CATEGORY_CARDS, CHAT_PANEL, QUICK_PROMPTS};
use campus_core::{normalize_text, MatchMode, ReplyPacing, Transcript};
use campus_observability::{init_tracing_with_level, AppMetrics};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "campus")]
#[command(about = "Smart Campus Assistant CLI")]
struct Cli {
    /// Match keywords as whole words instead of substrings.
    #[arg(long, global = true)]
    whole_word: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Chat {
        /// Print replies immediately instead of pausing 1-2 seconds.
        #[arg(long)]
        no_delay: bool,
    },
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    Categories,
    Prompts,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_with_level("campus_cli", "warn");
    let cli = Cli::parse();

    let match_mode = if cli.whole_word {
        MatchMode::WholeWord
    } else {
        MatchMode::Substring
    };

    match cli.command {
        Command::Chat { no_delay } => {
            let pacing = if no_delay {
                ReplyPacing::immediate()
            } else {
                ReplyPacing::default()
            };
            let assistant =
                CampusAssistant::new(pacing, AppMetrics::shared()).with_match_mode(match_mode);
            run_chat(assistant).await?;
        }
        Command::Ask { text, json } => {
            let assistant = CampusAssistant::new(ReplyPacing::immediate(), AppMetrics::shared())
                .with_match_mode(match_mode);
            let answer = assistant.answer(&normalize_text(&text.join(" ")));
            if json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                println!("{}", answer.reply);
            }
        }
        Command::Categories => {
            println!("{}", serde_json::to_string_pretty(CATEGORY_CARDS)?);
        }
        Command::Prompts => {
            println!("{}", serde_json::to_string_pretty(QUICK_PROMPTS)?);
        }
    }

    Ok(())
}

async fn run_chat(assistant: CampusAssistant) -> Result<()> {
    let mut transcript = assistant.start_transcript();

    println!(
        "{} ({}). type 'exit' to quit.",
        CHAT_PANEL.assistant_name, CHAT_PANEL.status
    );
    print_latest(&transcript);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("failed reading from stdin")?;
        if read == 0 {
            break;
        }

        let message = line.trim_end_matches(['\r', '\n']);
        if message.trim().eq_ignore_ascii_case("exit") || message.trim().eq_ignore_ascii_case("quit")
        {
            break;
        }

        // blank lines are ignored, same as the send button
        let Ok(directive) = assistant.handle_turn(&mut transcript, message) else {
            continue;
        };

        if directive.delay_ms > 0 {
            println!("{} is typing...", CHAT_PANEL.assistant_name);
            tokio::time::sleep(directive.delay()).await;
        }

        assistant.deliver(&mut transcript, &directive);
        print_latest(&transcript);
    }

    Ok(())
}

fn print_latest(transcript: &Transcript) {
    if let Some(message) = transcript.last() {
        println!("\n{}\n", message.content);
    }
}
