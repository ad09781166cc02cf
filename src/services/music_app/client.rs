use std::time::Duration;

use color_eyre::eyre::Result;

use crate::osa::library::{duplicate_track, list_libraries, search_library};
use crate::osa::playlist::{
    create_playlist, delete_playlist_tracks, find_user_playlist, get_playlist_duration,
    get_playlist_tracks, play_playlist,
};
use crate::osa::{Osascript, launch_application};
use crate::ports::music_app::{
    LibraryRef, MusicAppClient, PlaylistLookup, PlaylistRef, SearchScope, TrackRef,
};

/// Production adapter: every call is one `osascript` run against the
/// application the `Osascript` handle is bound to.
pub struct OsaMusicAppClient {
    osa: Osascript,
}

impl OsaMusicAppClient {
    pub fn new(osa: Osascript) -> Self {
        Self { osa }
    }
}

impl MusicAppClient for OsaMusicAppClient {
    fn launch(&self) -> Result<()> {
        launch_application(&self.osa)?;
        Ok(())
    }

    fn libraries(&self) -> Result<Vec<LibraryRef>> {
        Ok(list_libraries(&self.osa)?)
    }

    fn search(
        &self,
        library: &LibraryRef,
        query: &str,
        scope: SearchScope,
    ) -> Result<Vec<TrackRef>> {
        Ok(search_library(
            &self.osa,
            &library.persistent_id,
            query,
            scope,
        )?)
    }

    fn find_user_playlist(&self, name: &str) -> Result<PlaylistLookup> {
        Ok(find_user_playlist(&self.osa, name)?.into())
    }

    fn create_playlist(&self, name: &str) -> Result<PlaylistRef> {
        Ok(create_playlist(&self.osa, name)?)
    }

    fn playlist_tracks(&self, playlist: &PlaylistRef) -> Result<Vec<TrackRef>> {
        Ok(get_playlist_tracks(&self.osa, &playlist.persistent_id)?)
    }

    fn delete_tracks(&self, playlist: &PlaylistRef, tracks: &[TrackRef]) -> Result<()> {
        let ids: Vec<&str> = tracks.iter().map(|t| t.persistent_id.as_str()).collect();
        delete_playlist_tracks(&self.osa, &playlist.persistent_id, &ids)?;
        Ok(())
    }

    fn duplicate_track(&self, track: &TrackRef, playlist: &PlaylistRef) -> Result<()> {
        duplicate_track(&self.osa, &track.persistent_id, &playlist.persistent_id)?;
        Ok(())
    }

    fn playlist_duration(&self, playlist: &PlaylistRef) -> Result<Duration> {
        Ok(get_playlist_duration(&self.osa, &playlist.persistent_id)?)
    }

    fn play_playlist(&self, playlist: &PlaylistRef) -> Result<()> {
        play_playlist(&self.osa, &playlist.persistent_id)?;
        Ok(())
    }
}
