use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use vibe_client::{presets, ChatSession, Message, RelayClient, SendOutcome, PRESETS};
use vibe_protocol::Role;

/// vibe-chat: talk to a local model through the vibe-relay
#[derive(Parser)]
#[command(name = "vibe-chat")]
struct Cli {
    /// Base URL of the relay.
    #[arg(long, env = "VIBE_RELAY_URL", default_value = "http://127.0.0.1:3000")]
    relay_url: String,

    /// System prompt sent with every message.
    #[arg(long, conflicts_with = "preset")]
    system_prompt: Option<String>,

    /// Start with a built-in system prompt preset (see /presets).
    #[arg(long)]
    preset: Option<String>,
}

/// Prints the streaming reply from transcript snapshots.
#[derive(Default)]
struct TerminalView {
    reply_id: Option<String>,
    printed: usize,
}

impl TerminalView {
    fn render(&mut self, messages: &[Message]) {
        let Some(last) = messages.last().filter(|m| m.role == Role::Assistant) else {
            return;
        };
        let mut out = std::io::stdout().lock();
        if self.reply_id.as_deref() != Some(last.id.as_str()) {
            self.reply_id = Some(last.id.clone());
            self.printed = 0;
            let _ = write!(out, "assistant> ");
        }
        if let Some(new_text) = last.content.get(self.printed..) {
            let _ = write!(out, "{new_text}");
            self.printed = last.content.len();
        }
        let _ = out.flush();
    }
}

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Presets,
    Clear,
    Preset(Option<&'a str>),
    System(Option<&'a str>),
    /// Anything that is not a command is sent to the model.
    Chat,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (line, None),
        };
        match (name, arg) {
            ("/quit" | "/exit", None) => Self::Quit,
            ("/help", None) => Self::Help,
            ("/presets", None) => Self::Presets,
            ("/clear", None) => Self::Clear,
            ("/preset", arg) => Self::Preset(arg),
            ("/system", arg) => Self::System(arg),
            _ => Self::Chat,
        }
    }
}

fn print_presets() {
    for preset in PRESETS {
        println!("  {} {:<16} {}", preset.icon, preset.slug, preset.name);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interleave with the streamed reply.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut session = ChatSession::new(RelayClient::new(&cli.relay_url)?);
    if let Some(name) = &cli.preset {
        match presets::find(name) {
            Some(preset) => session.set_system_prompt(preset.prompt),
            None => {
                eprintln!("error: unknown preset '{name}'. Available presets:");
                print_presets();
                std::process::exit(1);
            }
        }
    } else if let Some(prompt) = cli.system_prompt {
        session.set_system_prompt(prompt);
    }

    println!("vibe-chat connected to {}. Type /help for commands.", cli.relay_url);

    let mut updates = session.subscribe();
    let mut view = TerminalView::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => {
                println!("  /presets          list system prompt presets");
                println!("  /preset <name>    switch to a preset");
                println!("  /system [text]    show or set the system prompt");
                println!("  /clear            start a new conversation");
                println!("  /quit             exit");
            }
            Command::Presets => print_presets(),
            Command::Clear => {
                session.clear();
                view = TerminalView::default();
            }
            Command::Preset(None) => {
                println!("usage: /preset <name>");
                print_presets();
            }
            Command::Preset(Some(name)) => match presets::find(name) {
                Some(preset) => {
                    session.set_system_prompt(preset.prompt);
                    println!("system prompt set to {} {}", preset.icon, preset.name);
                }
                None => println!("unknown preset '{name}'"),
            },
            Command::System(None) => {
                println!("usage: /system <text>. Current system prompt:");
                println!("{}", session.system_prompt());
            }
            Command::System(Some(prompt)) => {
                session.set_system_prompt(prompt);
                println!("system prompt updated");
            }
            Command::Chat => {
                chat(&session, &line, &mut updates, &mut view).await;
            }
        }
    }

    Ok(())
}

/// Send one line and render the reply as it streams in.
async fn chat(
    session: &ChatSession,
    line: &str,
    updates: &mut watch::Receiver<Vec<Message>>,
    view: &mut TerminalView,
) {
    let send = session.send(line);
    let mut send = std::pin::pin!(send);
    let outcome = loop {
        tokio::select! {
            outcome = &mut send => break outcome,
            Ok(()) = updates.changed() => view.render(&updates.borrow_and_update()),
        }
    };
    view.render(&updates.borrow_and_update());

    match outcome {
        SendOutcome::Blank | SendOutcome::Busy => {}
        SendOutcome::Completed { .. } | SendOutcome::Unreachable => println!(),
    }
}
