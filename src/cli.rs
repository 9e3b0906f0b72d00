use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::fetchers::Provider;

#[derive(Parser, Debug)]
#[command(author, version, about = "College football rankings from weekly game results")]
pub struct Cli {
    /// Command (defaults to `update`)
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch the season, recompute the ranking and save it
    Update(UpdateArgs),
    /// Start the rankings HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Minutes between scheduled refreshes, 0 to disable (defaults to 60)
        #[arg(long, value_name = "MINUTES")]
        refresh_every: Option<u64>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides on top of the environment configuration
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct UpdateArgs {
    /// Schedule provider
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,
    /// Season year
    #[arg(long)]
    pub season: Option<i32>,
    /// Where to write the rankings snapshot
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Number of teams to publish
    #[arg(long)]
    pub top: Option<usize>,
    /// Print each team's quality wins and schedule
    #[arg(long)]
    pub detail: bool,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Update(UpdateArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_update() {
        let cli = Cli::try_parse_from(["cfb_rankings"]).unwrap();
        assert_eq!(cli.into_command(), Command::Update(UpdateArgs::default()));
    }

    #[test]
    fn test_update_flags() {
        let cli = Cli::try_parse_from([
            "cfb_rankings",
            "update",
            "--provider",
            "espn",
            "--season",
            "2024",
            "--top",
            "10",
            "-o",
            "out.json",
            "--detail",
        ])
        .unwrap();

        assert_eq!(
            cli.into_command(),
            Command::Update(UpdateArgs {
                provider: Some(Provider::Espn),
                season: Some(2024),
                output: Some(PathBuf::from("out.json")),
                top: Some(10),
                detail: true,
            })
        );
    }

    #[test]
    fn test_serve_default_port() {
        let cli = Cli::try_parse_from(["cfb_rankings", "serve"]).unwrap();
        assert_eq!(
            cli.into_command(),
            Command::Serve {
                port: 3000,
                refresh_every: None
            }
        );
    }

    #[test]
    fn test_serve_refresh_every() {
        let cli = Cli::try_parse_from(["cfb_rankings", "serve", "--refresh-every", "15"]).unwrap();
        assert_eq!(
            cli.into_command(),
            Command::Serve {
                port: 3000,
                refresh_every: Some(15)
            }
        );
    }
}
