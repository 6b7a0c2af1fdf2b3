//! Interactive debug driver for ludus boards.
//!
//! Loads a rules script and an API script from files, initializes a board
//! and drives it from stdin. Useful for exercising rule scripts without a
//! host application.
//!
//! # Commands
//!
//! ```text
//! move <text>                submit a move
//! query <q1> [; <q2> ...]    run a query batch, printed as JSON
//! history start|exit         enter/leave history browsing
//! history back|forward <n>   step the cursor
//! history goto <index>       jump the cursor
//! history cursor             print the cursor position
//! log                        print the request/response logs
//! quit                       tear the board down and exit
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use ludus_board::Board;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Interactive debug driver for script-defined game boards.
#[derive(Parser, Debug)]
#[command(name = "ludus")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the API script
    api: PathBuf,

    /// Path to the rules script (loaded before the API script)
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Initial request passed to the engine's init entry point
    #[arg(long, default_value = "start")]
    init_request: String,

    /// Record request/response history and enable time travel
    #[arg(long)]
    history: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// One parsed REPL command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Move(String),
    Query(Vec<String>),
    HistoryStart,
    HistoryExit,
    HistoryBack(usize),
    HistoryForward(usize),
    HistoryGoto(usize),
    HistoryCursor,
    Log,
    Help,
    Quit,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let rules_code = match &args.rules {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rules script {}", path.display()))?,
        None => String::new(),
    };
    let api_code = std::fs::read_to_string(&args.api)
        .with_context(|| format!("failed to read api script {}", args.api.display()))?;

    let mut board = Board::initialize(
        &rules_code,
        &api_code,
        Some(&args.init_request),
        args.history,
    );
    if let Some(error) = board.last_error() {
        bail!("board initialization failed: {error}");
    }
    tracing::debug!(
        api = %args.api.display(),
        history = args.history,
        "board initialized"
    );
    println!("{}", board.response());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(command) => run_command(&mut board, command)?,
            Err(message) => eprintln!("{message}"),
        }
    }

    board.destroy();
    Ok(())
}

fn run_command(board: &mut Board, command: Command) -> Result<()> {
    match command {
        Command::Move(text) => {
            let accepted = board.make_move(&text);
            match board.last_error() {
                Some(error) => eprintln!("{error}"),
                None => println!(
                    "{} ({})",
                    board.response(),
                    if accepted { "accepted" } else { "rejected" }
                ),
            }
        }
        Command::Query(queries) => match board.query(&queries) {
            Some(batch) => println!("{}", serde_json::to_string_pretty(batch)?),
            None => print_error(board),
        },
        Command::HistoryStart => {
            if board.history_start() {
                println!("browsing at {}", board.history_cursor());
            } else {
                print_error(board);
            }
        }
        Command::HistoryExit => {
            if board.history_exit() {
                println!("live");
            } else {
                print_error(board);
            }
        }
        Command::HistoryBack(steps) => match board.history_back(steps) {
            Some(index) => println!("at {index}"),
            None => print_error(board),
        },
        Command::HistoryForward(steps) => match board.history_forward(steps) {
            Some(index) => println!("at {index}"),
            None => print_error(board),
        },
        Command::HistoryGoto(index) => match board.history_goto(index) {
            Some(index) => println!("at {index}"),
            None => print_error(board),
        },
        Command::HistoryCursor => println!("{}", board.history_cursor()),
        Command::Log => match board.history() {
            Some(ledger) => {
                for (i, request) in ledger.requests().iter().enumerate() {
                    let response = ledger.response(i).unwrap_or("<no response>");
                    println!("{i}: {request} -> {response}");
                }
            }
            None => eprintln!("history is not enabled (run with --history)"),
        },
        Command::Help => print_help(),
        Command::Quit => unreachable!("handled by the caller"),
    }
    Ok(())
}

fn print_error(board: &Board) {
    match board.last_error() {
        Some(error) => eprintln!("{error}"),
        None => eprintln!("operation failed"),
    }
}

fn print_help() {
    println!(
        "commands:\n  \
         move <text>\n  \
         query <q1> [; <q2> ...]\n  \
         history start|exit|cursor\n  \
         history back|forward|goto <n>\n  \
         log\n  \
         quit"
    );
}

/// Parses one REPL line.
fn parse_command(line: &str) -> Result<Command, String> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "move" => {
            if rest.is_empty() {
                return Err("usage: move <text>".into());
            }
            Ok(Command::Move(rest.to_owned()))
        }
        "query" => {
            let queries: Vec<String> = rest
                .split(';')
                .map(|q| q.trim().to_owned())
                .filter(|q| !q.is_empty())
                .collect();
            if queries.is_empty() {
                return Err("usage: query <q1> [; <q2> ...]".into());
            }
            Ok(Command::Query(queries))
        }
        "history" => parse_history_command(rest),
        "log" => Ok(Command::Log),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command \"{other}\" (try \"help\")")),
    }
}

fn parse_history_command(rest: &str) -> Result<Command, String> {
    let (sub, arg) = match rest.split_once(char::is_whitespace) {
        Some((sub, arg)) => (sub, arg.trim()),
        None => (rest, ""),
    };

    let parse_count = |what: &str| {
        arg.parse::<usize>()
            .map_err(|_| format!("usage: history {what} <n>"))
    };

    match sub {
        "start" => Ok(Command::HistoryStart),
        "exit" => Ok(Command::HistoryExit),
        "cursor" => Ok(Command::HistoryCursor),
        "back" => Ok(Command::HistoryBack(parse_count("back")?)),
        "forward" => Ok(Command::HistoryForward(parse_count("forward")?)),
        "goto" => Ok(Command::HistoryGoto(parse_count("goto")?)),
        _ => Err("usage: history start|exit|cursor|back <n>|forward <n>|goto <n>".into()),
    }
}
