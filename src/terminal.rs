use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::motivator;
use crate::timer::{Command, Preset, Snapshot, TimerHandle, preset};

const HELP: &str = "commands: start | stop | select <1:00|5:00|10:00|30:00|45:00|60:00> | presets | phrase [plain] | status | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCommand {
    Timer(Command),
    Presets,
    Phrase { plain: bool },
    Help,
    Quit,
}

/// Parse one line of user input.
pub fn parse_line(line: &str) -> Result<Option<TerminalCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let command = match (verb.to_lowercase().as_str(), argument) {
        ("start", None) => TerminalCommand::Timer(Command::Start),
        ("stop", None) => TerminalCommand::Timer(Command::Stop),
        ("status", None) => TerminalCommand::Timer(Command::Status),
        ("select" | "set", Some(value)) => {
            let preset: Preset = value.parse().map_err(|e| format!("{}", e))?;
            TerminalCommand::Timer(Command::Select(preset))
        }
        ("select" | "set", None) => return Err("select needs a duration, e.g. select 5:00".into()),
        ("presets", None) => TerminalCommand::Presets,
        ("phrase", None) => TerminalCommand::Phrase { plain: false },
        ("phrase", Some("plain")) => TerminalCommand::Phrase { plain: true },
        ("help" | "?", _) => TerminalCommand::Help,
        ("quit" | "exit", None) => TerminalCommand::Quit,
        _ => return Err(format!("unrecognised command '{}', type 'help'", line.trim())),
    };
    Ok(Some(command))
}

/// One status line: the M:SS display on its backdrop plus the controls.
pub fn render(snapshot: &Snapshot) -> String {
    let controls = match (snapshot.can_start, snapshot.can_stop) {
        (true, _) => "[start]",
        (_, true) => "[stop]",
        _ => "",
    };
    format!(
        "{} {:>5} \x1b[0m  {} {} {}",
        snapshot.backdrop.ansi(),
        snapshot.display,
        snapshot.preset,
        if snapshot.running { "running" } else { "stopped" },
        controls
    )
}

fn spawn_renderer(timer: &TimerHandle) -> JoinHandle<()> {
    let mut snapshots = timer.subscribe();
    tokio::spawn(async move {
        loop {
            let line = render(&snapshots.borrow_and_update());
            print!("\r\x1b[2K{}", line);
            let _ = std::io::stdout().flush();
            if snapshots.changed().await.is_err() {
                break;
            }
        }
    })
}

/// Interactive front end: one command per stdin line until `quit` or EOF.
pub async fn run_terminal(timer: TimerHandle) -> Result<()> {
    println!("{}", HELP);
    let renderer = spawn_renderer(&timer);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("\r\x1b[2K{}", message);
                continue;
            }
        };
        debug!(?command, "terminal command");

        match command {
            TerminalCommand::Timer(command) => {
                if let Err(e) = timer.send(command).await {
                    println!("\r\x1b[2K{}", e);
                }
            }
            TerminalCommand::Presets => {
                println!("\r\x1b[2K{}", preset::labels().join("  "));
            }
            TerminalCommand::Phrase { plain } => {
                let phrase = if plain {
                    motivator::pick_plain()
                } else {
                    motivator::pick_decorated().to_string()
                };
                println!("\r\x1b[2K{}", phrase);
            }
            TerminalCommand::Help => println!("\r\x1b[2K{}", HELP),
            TerminalCommand::Quit => break,
        }
    }

    renderer.abort();
    println!();
    Ok(())
}
