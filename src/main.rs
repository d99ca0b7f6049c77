use anyhow::Result;

use football_performance_model::cli::Command;
use football_performance_model::{
    handle_completions, handle_init, handle_rate, handle_season, handle_serve, handle_weights, interpret,
};

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
        Command::Serve { port } => handle_serve(*port),
        Command::Init { reset } => handle_init(*reset),
        Command::Rate { player, match_id } => handle_rate(*player, *match_id),
        Command::Season {
            player,
            season,
            role_transfer,
        } => handle_season(*player, season.as_deref(), *role_transfer),
        Command::Weights => handle_weights(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
