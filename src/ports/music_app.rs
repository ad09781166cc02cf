use std::time::Duration;

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

/// A library playlist of the host application (the searchable collection).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryRef {
    #[serde(rename = "id")]
    pub persistent_id: String,
    pub name: String,
}

/// A user playlist of the host application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistRef {
    #[serde(rename = "id")]
    pub persistent_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackRef {
    #[serde(rename = "id")]
    pub persistent_id: String,
    pub name: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

/// Outcome of looking a user playlist up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistLookup {
    Found(PlaylistRef),
    Absent,
}

impl From<Option<PlaylistRef>> for PlaylistLookup {
    fn from(value: Option<PlaylistRef>) -> Self {
        match value {
            Some(playlist) => PlaylistLookup::Found(playlist),
            None => PlaylistLookup::Absent,
        }
    }
}

/// Item kinds a library search covers. Mirrors the `only` parameter of the
/// host's `search` command.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Artists,
    Albums,
    Composers,
    Songs,
    Displayed,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::All => "all",
            SearchScope::Artists => "artists",
            SearchScope::Albums => "albums",
            SearchScope::Composers => "composers",
            SearchScope::Songs => "songs",
            SearchScope::Displayed => "displayed",
        }
    }
}

/// Port trait wrapping the media application capabilities used by the
/// playlist refresh.
///
/// Implementations live in `services::music_app::client` (production) or test
/// doubles. The application the port talks to is fixed when the
/// implementation is constructed.
#[cfg_attr(test, mockall::automock)]
pub trait MusicAppClient {
    /// Start the application, or bring it up if it is already running.
    fn launch(&self) -> Result<()>;

    fn libraries(&self) -> Result<Vec<LibraryRef>>;

    fn search(
        &self,
        library: &LibraryRef,
        query: &str,
        scope: SearchScope,
    ) -> Result<Vec<TrackRef>>;

    fn find_user_playlist(&self, name: &str) -> Result<PlaylistLookup>;

    fn create_playlist(&self, name: &str) -> Result<PlaylistRef>;

    fn playlist_tracks(&self, playlist: &PlaylistRef) -> Result<Vec<TrackRef>>;

    fn delete_tracks(&self, playlist: &PlaylistRef, tracks: &[TrackRef]) -> Result<()>;

    /// Insert a copy of `track` at the end of `playlist`. The source track
    /// stays where it is.
    fn duplicate_track(&self, track: &TrackRef, playlist: &PlaylistRef) -> Result<()>;

    fn playlist_duration(&self, playlist: &PlaylistRef) -> Result<Duration>;

    fn play_playlist(&self, playlist: &PlaylistRef) -> Result<()>;
}
