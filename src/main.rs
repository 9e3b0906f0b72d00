use anyhow::Result;

use cfb_rankings::cli::Command;
use cfb_rankings::{handle_completions, handle_serve, handle_update, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Update(args) => handle_update(args),
        Command::Serve { port, refresh_every } => handle_serve(*port, *refresh_every),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
