use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "football performance model backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema
    Init {
        /// Drop all players, matches and actions first
        #[arg(long)]
        reset: bool,
    },
    /// Print a player's Match Performance Rating
    Rate {
        #[arg(long)]
        player: i64,
        #[arg(long = "match")]
        match_id: i64,
    },
    /// Print a player's Contextual Season Rating
    Season {
        #[arg(long)]
        player: i64,
        /// Season such as 2024/25 (defaults to the current one)
        #[arg(long)]
        season: Option<String>,
        /// Role transferability score, 0-10
        #[arg(long = "role-transfer")]
        role_transfer: Option<f64>,
    },
    /// Print the action weighting table
    Weights,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rate_arguments() {
        let cli = Cli::try_parse_from(["fpm", "rate", "--player", "3", "--match", "9"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Rate {
                player: 3,
                match_id: 9
            }
        );
    }

    #[test]
    fn serve_port_defaults_to_3000() {
        let cli = Cli::try_parse_from(["fpm", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 3000 });
    }

    #[test]
    fn season_flags_are_optional() {
        let cli = Cli::try_parse_from(["fpm", "season", "--player", "1", "--role-transfer", "6.5"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Season {
                player: 1,
                season: None,
                role_transfer: Some(6.5)
            }
        );
    }
}
