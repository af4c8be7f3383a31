use clap::{Parser, Subcommand, ValueEnum};
use cine_config::PathManager;
use cine_core::PickMode;
use cine_models::MediaType;
use color_eyre::eyre::Result;
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;

use context::AppContext;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "cinenos")]
#[command(about = "Find something to watch on the streaming services you already pay for", long_about = None)]
struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Directory holding watched.json and the other data files
    #[arg(long, env = "CINENOS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies and shows by title
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show the full card of a title, with where to stream it
    Details {
        /// movie or tv
        media_type: MediaType,
        id: u64,
    },
    /// Search a title, then list titles similar to it
    Similar {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Use the Nth search hit (1-based) instead of asking
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Popular and top-rated titles on the configured streaming services
    Discover,
    /// Draw a random title
    Pick {
        /// movie or tv
        media_type: MediaType,
        #[arg(long, value_enum, default_value = "genre")]
        mode: PickModeArg,
        /// Genre name (repeatable); defaults to the usual genre set
        #[arg(long = "genre")]
        genres: Vec<String>,
        /// Add the drawn title to the watched list
        #[arg(long)]
        mark_watched: bool,
    },
    /// List the catalog genres
    Genres {
        /// movie or tv
        media_type: MediaType,
    },
    /// Manage the watched list
    Watched {
        #[command(subcommand)]
        command: WatchedCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchedCommands {
    /// Show the watched list, newest first
    List,
    /// Mark a title as watched
    Add {
        /// movie or tv
        media_type: MediaType,
        id: u64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Store the TMDB API key
    SetKey {
        /// Prompted for when omitted
        key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PickModeArg {
    Genre,
    Popular,
    TopRated,
}

impl PickModeArg {
    fn into_mode(self, genres: Vec<String>) -> PickMode {
        match self {
            PickModeArg::Genre if genres.is_empty() => PickMode::default_genres(),
            PickModeArg::Genre => PickMode::ByGenre(genres),
            PickModeArg::Popular => PickMode::Popular,
            PickModeArg::TopRated => PickMode::TopRated,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize logging: {}", e))?;

    let output = Output::new(cli.output, cli.quiet);
    let data_dir = cli.data_dir;
    // config.toml is only read by the commands that need it
    let context = || AppContext::load(data_dir.clone());

    match cli.command {
        Commands::Search { query } => {
            commands::browse::run_search(&context()?, &query.join(" "), &output).await?;
        }
        Commands::Details { media_type, id } => {
            commands::browse::run_details(&context()?, media_type, id, &output).await?;
        }
        Commands::Similar { query, pick } => {
            commands::similar::run_similar(&context()?, &query.join(" "), pick, &output).await?;
        }
        Commands::Discover => {
            commands::browse::run_discover(&context()?, &output).await?;
        }
        Commands::Pick {
            media_type,
            mode,
            genres,
            mark_watched,
        } => {
            let mode = mode.into_mode(genres);
            commands::pick::run_pick(&context()?, media_type, &mode, mark_watched, &output).await?;
        }
        Commands::Genres { media_type } => {
            commands::browse::run_genres(&context()?, media_type, &output).await?;
        }
        Commands::Watched { command } => match command {
            WatchedCommands::List => {
                commands::watched::run_list(&context()?, &output)?;
            }
            WatchedCommands::Add { media_type, id } => {
                commands::watched::run_add(&context()?, media_type, id, &output).await?;
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                commands::config::run_show(&context()?, &output)?;
            }
            ConfigCommands::Init { force } => {
                commands::config::run_init(&PathManager::default(), force, &output)?;
            }
            ConfigCommands::SetKey { key } => {
                commands::config::run_set_key(&PathManager::default(), key, &output)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_defaults_to_genre_mode() {
        let cli = Cli::try_parse_from(["cinenos", "pick", "movie"]).unwrap();
        match cli.command {
            Commands::Pick {
                media_type,
                mode,
                genres,
                mark_watched,
            } => {
                assert_eq!(media_type, MediaType::Movie);
                assert_eq!(mode, PickModeArg::Genre);
                assert!(genres.is_empty());
                assert!(!mark_watched);
                assert_eq!(mode.into_mode(genres), PickMode::default_genres());
            }
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_pick_with_genres_and_flags() {
        let cli = Cli::try_parse_from([
            "cinenos",
            "pick",
            "series",
            "--genre",
            "Drama",
            "--genre",
            "Crime",
            "--mark-watched",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Pick {
                media_type,
                mode,
                genres,
                mark_watched,
            } => {
                assert_eq!(media_type, MediaType::Tv);
                assert!(mark_watched);
                assert_eq!(
                    mode.into_mode(genres),
                    PickMode::ByGenre(vec!["Drama".to_string(), "Crime".to_string()])
                );
            }
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_pick_top_rated_mode() {
        let cli = Cli::try_parse_from(["cinenos", "pick", "tv", "--mode", "top-rated"]).unwrap();
        match cli.command {
            Commands::Pick { mode, genres, .. } => assert_eq!(mode.into_mode(genres), PickMode::TopRated),
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn test_search_joins_words_and_global_flags() {
        let cli = Cli::try_parse_from(["cinenos", "--output", "json", "search", "cidade", "de", "deus"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Search { query } => assert_eq!(query.join(" "), "cidade de deus"),
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_rejects_unknown_media_type() {
        assert!(Cli::try_parse_from(["cinenos", "details", "podcast", "1"]).is_err());
    }

    #[test]
    fn test_watched_add() {
        let cli = Cli::try_parse_from(["cinenos", "watched", "add", "movie", "603"]).unwrap();
        match cli.command {
            Commands::Watched {
                command: WatchedCommands::Add { media_type, id },
            } => {
                assert_eq!(media_type, MediaType::Movie);
                assert_eq!(id, 603);
            }
            _ => panic!("expected watched add"),
        }
    }
}
