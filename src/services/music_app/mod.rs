pub mod client;

use std::time::Duration;

use color_eyre::eyre::{OptionExt, Result, WrapErr};
use serde::Serialize;

use crate::config::Config;
use crate::ports::music_app::{MusicAppClient, PlaylistLookup, PlaylistRef, SearchScope};
use crate::services::search_term::normalize_query;

/// What a single refresh should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequest {
    pub playlist: String,
    pub query: String,
    pub scope: SearchScope,
    /// Start playing the playlist once it is rebuilt
    pub play: bool,
}

impl RefreshRequest {
    pub fn from_config(config: &Config) -> Self {
        Self {
            playlist: config.playlist.clone(),
            query: config.query.clone(),
            scope: config.search_scope,
            play: false,
        }
    }
}

/// Result of refreshing a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub playlist: String,
    pub matched: usize,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub created: bool,
}

impl RefreshSummary {
    /// The playlist name and the number of search matches copied into it.
    pub fn result_pair(&self) -> (&str, usize) {
        (&self.playlist, self.matched)
    }
}

fn serialize_secs<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(duration.as_secs())
}

pub struct MusicAppService<C: MusicAppClient> {
    client: C,
}

impl<C: MusicAppClient> MusicAppService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Rebuilds the named playlist from a library search.
    ///
    /// This function:
    /// - Launches the application and searches its primary library
    /// - Finds the playlist by name, creating it when absent
    /// - Deletes every track currently in the playlist
    /// - Duplicates each search result into the playlist, in result order
    ///
    /// Only playlist absence is recovered. Any other failure aborts the
    /// refresh; a failure after the clear leaves the playlist empty.
    pub fn refresh_playlist(&self, request: &RefreshRequest) -> Result<RefreshSummary> {
        let query = normalize_query(&request.query)?;
        log::info!(
            "Refreshing playlist '{}' from search '{}' ({})",
            request.playlist,
            query,
            request.scope.as_str()
        );

        // Step 1: Launch
        self.client
            .launch()
            .wrap_err("Failed to launch the music application")?;

        // Step 2: Primary library
        let library = self
            .client
            .libraries()
            .wrap_err("Failed to list libraries")?
            .into_iter()
            .next()
            .ok_or_eyre("The music application has no library")?;
        log::debug!(
            "Using library '{}' ({})",
            library.name,
            library.persistent_id
        );

        // Step 3: Search
        let result = self
            .client
            .search(&library, &query, request.scope)
            .wrap_err_with(|| format!("Failed to search library for '{}'", query))?;
        log::info!("Search matched {} tracks", result.len());

        // Step 4: Find or create the playlist
        let (playlist, created) = self.resolve_playlist(&request.playlist)?;

        // Step 5: Clear
        let current = self
            .client
            .playlist_tracks(&playlist)
            .wrap_err("Failed to list playlist tracks")?;
        log::debug!("Removing {} tracks from '{}'", current.len(), playlist.name);
        self.client
            .delete_tracks(&playlist, &current)
            .wrap_err("Failed to clear playlist")?;

        // Step 6: Repopulate
        for track in &result {
            log::debug!(
                "Adding '{}' by {} from {} ({})",
                track.name,
                track.artist.as_deref().unwrap_or("unknown artist"),
                track.album.as_deref().unwrap_or("unknown album"),
                track.persistent_id
            );
            self.client
                .duplicate_track(track, &playlist)
                .wrap_err_with(|| format!("Failed to add '{}' to playlist", track.name))?;
        }

        let duration = self
            .client
            .playlist_duration(&playlist)
            .wrap_err("Failed to read playlist duration")?;
        log::info!(
            "Playlist '{}' now runs for {}",
            playlist.name,
            humantime::format_duration(duration)
        );

        if request.play {
            self.client
                .play_playlist(&playlist)
                .wrap_err("Failed to start playback")?;
            log::info!("Playing '{}'", playlist.name);
        }

        Ok(RefreshSummary {
            playlist: request.playlist.clone(),
            matched: result.len(),
            duration,
            created,
        })
    }

    /// Returns the playlist and whether it had to be created.
    fn resolve_playlist(&self, name: &str) -> Result<(PlaylistRef, bool)> {
        match self
            .client
            .find_user_playlist(name)
            .wrap_err("Failed to look up playlist")?
        {
            PlaylistLookup::Found(playlist) => {
                log::debug!(
                    "Found existing playlist: '{}' ({})",
                    playlist.name,
                    playlist.persistent_id
                );
                Ok((playlist, false))
            }
            PlaylistLookup::Absent => {
                log::info!("Creating new playlist: '{}'", name);
                let playlist = self
                    .client
                    .create_playlist(name)
                    .wrap_err_with(|| format!("Failed to create playlist '{}'", name))?;
                Ok((playlist, true))
            }
        }
    }
}
