pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod report;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::Season;
use crate::rating::weighting_table;
use crate::services::rating::RatingService;
use crate::services::server::ServerService;
use crate::store::EventStore;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init(reset: bool) -> Result<()> {
    let config = AppConfig::new();
    let store = EventStore::open(&config.store)?;
    if reset {
        store.reset()?;
        info!("Database reset at {}", config.store.database_path);
    } else {
        info!("Schema ready at {}", config.store.database_path);
    }
    Ok(())
}

pub fn handle_rate(player_id: i64, match_id: i64) -> Result<()> {
    let config = AppConfig::new();
    let store = EventStore::open(&config.store)?;
    let service = RatingService::new(store, config.rating);

    let rating = service.match_rating(player_id, match_id)?;
    print!("{}", report::match_report(&rating));
    Ok(())
}

pub fn handle_season(player_id: i64, season: Option<&str>, role_transfer: Option<f64>) -> Result<()> {
    let season = season.map(str::parse::<Season>).transpose()?;

    let config = AppConfig::new();
    let store = EventStore::open(&config.store)?;
    let service = RatingService::new(store, config.rating);

    let rating = service.season_rating(player_id, season, role_transfer)?;
    print!("{}", report::season_report(&rating));
    Ok(())
}

pub fn handle_weights() -> Result<()> {
    print!("{}", report::weights_report(&weighting_table()));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
