use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};

use crate::ports::music_app::{
    LibraryRef, MusicAppClient, PlaylistLookup, PlaylistRef, SearchScope, TrackRef,
};

pub fn track(name: &str) -> TrackRef {
    TrackRef {
        persistent_id: format!("{}-id", name),
        name: name.to_string(),
        artist: Some("Artist".to_string()),
        album: Some("Album".to_string()),
    }
}

#[derive(Default)]
struct FakeState {
    launched: bool,
    search_result: Vec<TrackRef>,
    queries: Vec<String>,
    playlists: Vec<(PlaylistRef, Vec<TrackRef>)>,
    create_calls: Vec<String>,
    delete_calls: usize,
    played: Vec<String>,
    fail_duplicates: bool,
}

/// In-memory stand-in for the media application. Every search returns the
/// same configured result; playlists keep their contents across calls.
pub struct FakeMusicApp {
    state: RefCell<FakeState>,
}

impl FakeMusicApp {
    pub const TRACK_DURATION: Duration = Duration::from_secs(180);

    pub fn with_search_result(search_result: Vec<TrackRef>) -> Self {
        Self {
            state: RefCell::new(FakeState {
                search_result,
                ..Default::default()
            }),
        }
    }

    pub fn add_playlist(&self, name: &str, tracks: Vec<TrackRef>) {
        let mut state = self.state.borrow_mut();
        let playlist = PlaylistRef {
            persistent_id: format!("PL{}", state.playlists.len() + 1),
            name: name.to_string(),
        };
        state.playlists.push((playlist, tracks));
    }

    pub fn fail_duplicates(&self) {
        self.state.borrow_mut().fail_duplicates = true;
    }

    pub fn playlist_contents(&self, name: &str) -> Vec<TrackRef> {
        self.state
            .borrow()
            .playlists
            .iter()
            .find(|(p, _)| p.name == name)
            .map(|(_, tracks)| tracks.clone())
            .unwrap_or_default()
    }

    pub fn launched(&self) -> bool {
        self.state.borrow().launched
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.borrow().queries.clone()
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.state.borrow().create_calls.clone()
    }

    pub fn delete_calls(&self) -> usize {
        self.state.borrow().delete_calls
    }

    pub fn played(&self) -> Vec<String> {
        self.state.borrow().played.clone()
    }

    fn with_playlist<T>(
        &self,
        playlist: &PlaylistRef,
        f: impl FnOnce(&mut Vec<TrackRef>) -> T,
    ) -> Result<T> {
        let mut state = self.state.borrow_mut();
        let (_, tracks) = state
            .playlists
            .iter_mut()
            .find(|(p, _)| p.persistent_id == playlist.persistent_id)
            .ok_or_else(|| eyre!("No playlist with id {}", playlist.persistent_id))?;
        Ok(f(tracks))
    }
}

impl MusicAppClient for FakeMusicApp {
    fn launch(&self) -> Result<()> {
        self.state.borrow_mut().launched = true;
        Ok(())
    }

    fn libraries(&self) -> Result<Vec<LibraryRef>> {
        Ok(vec![LibraryRef {
            persistent_id: "LIB1".to_string(),
            name: "Library".to_string(),
        }])
    }

    fn search(
        &self,
        _library: &LibraryRef,
        query: &str,
        _scope: SearchScope,
    ) -> Result<Vec<TrackRef>> {
        let mut state = self.state.borrow_mut();
        state.queries.push(query.to_string());
        Ok(state.search_result.clone())
    }

    fn find_user_playlist(&self, name: &str) -> Result<PlaylistLookup> {
        Ok(self
            .state
            .borrow()
            .playlists
            .iter()
            .find(|(p, _)| p.name == name)
            .map(|(p, _)| p.clone())
            .into())
    }

    fn create_playlist(&self, name: &str) -> Result<PlaylistRef> {
        self.add_playlist(name, Vec::new());
        let mut state = self.state.borrow_mut();
        state.create_calls.push(name.to_string());
        state
            .playlists
            .last()
            .map(|(p, _)| p.clone())
            .ok_or_else(|| eyre!("Playlist was not created"))
    }

    fn playlist_tracks(&self, playlist: &PlaylistRef) -> Result<Vec<TrackRef>> {
        self.with_playlist(playlist, |tracks| tracks.clone())
    }

    fn delete_tracks(&self, playlist: &PlaylistRef, tracks: &[TrackRef]) -> Result<()> {
        self.state.borrow_mut().delete_calls += 1;
        self.with_playlist(playlist, |contents| {
            contents.retain(|t| !tracks.iter().any(|d| d.persistent_id == t.persistent_id))
        })
    }

    fn duplicate_track(&self, track: &TrackRef, playlist: &PlaylistRef) -> Result<()> {
        if self.state.borrow().fail_duplicates {
            return Err(eyre!("duplicate rejected"));
        }
        let copy = TrackRef {
            persistent_id: format!("{}-copy", track.persistent_id),
            ..track.clone()
        };
        self.with_playlist(playlist, |contents| contents.push(copy))
    }

    fn playlist_duration(&self, playlist: &PlaylistRef) -> Result<Duration> {
        self.with_playlist(playlist, |tracks| {
            Self::TRACK_DURATION * tracks.len() as u32
        })
    }

    fn play_playlist(&self, playlist: &PlaylistRef) -> Result<()> {
        self.state.borrow_mut().played.push(playlist.name.clone());
        Ok(())
    }
}

/// Writes an executable standing in for `osascript`. It records its
/// arguments NUL-separated in `<dir>/args`, prints `stdout` and exits with
/// `exit_code`.
#[cfg(unix)]
pub fn stub_osascript(dir: &Path, stdout: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let program = dir.join("osascript");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\0' \"$@\" > '{}'\nprintf '%s\\n' '{}'\nexit {}\n",
        dir.join("args").display(),
        stdout,
        exit_code
    );
    std::fs::write(&program, script).unwrap();
    std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();
    program
}

/// Arguments the last `stub_osascript` run received.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    let raw = std::fs::read_to_string(dir.join("args")).unwrap();
    raw.split('\0')
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}
