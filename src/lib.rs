pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod rate_limiter;
pub mod report;
pub mod scoring;
pub mod services;
pub mod store;
pub mod teams;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, UpdateArgs};
use crate::config::settings::AppConfig;
use crate::services::ranking::RankingService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    Cli::parse().into_command()
}

/// Environment configuration with the command line flags on top
pub fn update_config(args: &UpdateArgs) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(provider) = args.provider {
        config.scraper.provider = provider;
    }
    if let Some(season) = args.season {
        config.season.year = season;
    }
    if let Some(output) = &args.output {
        config.output.rankings_path = output.clone();
    }
    if let Some(top) = args.top {
        config.ranking.top_n = top;
    }
    Ok(config)
}

pub fn handle_update(args: &UpdateArgs) -> Result<()> {
    let config = update_config(args)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let snapshot = runtime.block_on(async {
        let mut service = RankingService::new(config)?;
        service.refresh().await
    })?;

    print!("{}", report::render_table(&snapshot, args.detail));
    Ok(())
}

pub fn handle_serve(port: u16, refresh_every: Option<u64>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::from_env()?;
        if let Some(minutes) = refresh_every {
            config.server.refresh_minutes = minutes;
        }
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
