mod config;
mod logging;
mod osa;
mod ports;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::WrapErr};

use crate::{
    config::Config,
    logging::setup_logging,
    osa::Osascript,
    ports::music_app::SearchScope,
    services::music_app::{MusicAppService, RefreshRequest, client::OsaMusicAppClient},
    services::search_term::search_term,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "PLAYLIST_REFRESHER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Console log level (default: off)
    #[arg(long, default_value = "off", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "PLAYLIST_REFRESHER_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild the scratch playlist from a library search
    Refresh {
        /// Search query, used as is
        #[arg(short, long, conflicts_with_all = ["artist", "album"])]
        query: Option<String>,

        /// Search for an artist/album pair instead of a raw query
        #[arg(long, requires = "album")]
        artist: Option<String>,

        /// Album to search for together with --artist
        #[arg(long, requires = "artist")]
        album: Option<String>,

        /// Playlist to clear and refill
        #[arg(short, long)]
        playlist: Option<String>,

        /// Item kinds the search covers
        #[arg(short, long, value_enum)]
        scope: Option<SearchScope>,

        /// Scriptable application to drive, e.g. Music or iTunes
        #[arg(short, long)]
        application: Option<String>,

        /// Start playing the playlist once it is rebuilt
        #[arg(long)]
        play: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("Playlist refresher starting");
    log::debug!("Loading configuration");

    let mut config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load playlist-refresher config")?;

    match args.command {
        Commands::Refresh {
            query,
            artist,
            album,
            playlist,
            scope,
            application,
            play,
            json,
        } => {
            if let Some(application) = application {
                config.application = application;
            }
            if let Some(playlist) = playlist {
                config.playlist = playlist;
            }
            if let Some(scope) = scope {
                config.search_scope = scope;
            }
            if let Some(query) = query {
                config.query = query;
            } else if let (Some(artist), Some(album)) = (artist, album) {
                config.query = search_term(&artist, &album);
            }

            let request = RefreshRequest {
                play,
                ..RefreshRequest::from_config(&config)
            };

            let osa = Osascript::locate(config.osascript_path(), config.application.as_str())?;
            log::debug!(
                "Driving '{}' through {}",
                osa.application(),
                osa.program().display()
            );
            let service = MusicAppService::new(OsaMusicAppClient::new(osa));
            let summary = service.refresh_playlist(&request)?;

            if json {
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                let (playlist, matched) = summary.result_pair();
                println!("{}\t{}", playlist, matched);
            }
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default()?;
                log::info!("Default config at {}", path.display());
                println!("{}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
            ConfigCommands::Show => print!("{}", config.to_toml()?),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_refresh_artist_requires_album() {
        let result = Args::try_parse_from(["playlist-refresher", "refresh", "--artist", "Bach"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_query_conflicts_with_artist() {
        let result = Args::try_parse_from([
            "playlist-refresher",
            "refresh",
            "--query",
            "goya",
            "--artist",
            "Zoran Dukic",
            "--album",
            "24 Caprichos",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_flags() {
        let args = Args::try_parse_from([
            "playlist-refresher",
            "refresh",
            "--artist",
            "Zoran Dukic",
            "--album",
            "24 Caprichos",
            "--scope",
            "albums",
            "--play",
        ])
        .unwrap();

        match args.command {
            Commands::Refresh {
                artist,
                album,
                scope,
                play,
                json,
                ..
            } => {
                assert_eq!(artist.as_deref(), Some("Zoran Dukic"));
                assert_eq!(album.as_deref(), Some("24 Caprichos"));
                assert_eq!(scope, Some(SearchScope::Albums));
                assert!(play);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
