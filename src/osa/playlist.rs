use std::time::Duration;

use crate::osa::{OsaError, Osascript};
use crate::ports::music_app::{PlaylistRef, TrackRef};

/* ---------- Lookup and create ---------- */

// A `whose` filter yields an empty list for a missing name instead of
// throwing, so absence comes back as `null`.
const FIND_USER_PLAYLIST_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const matches = app.userPlaylists.whose({ name: argv[1] })();
    if (matches.length === 0) {
        return "null";
    }
    return JSON.stringify({ id: matches[0].persistentID(), name: matches[0].name() });
}
"#;

pub fn find_user_playlist(osa: &Osascript, name: &str) -> Result<Option<PlaylistRef>, OsaError> {
    osa.run_json("find playlist", FIND_USER_PLAYLIST_SCRIPT, &[name])
}

const CREATE_PLAYLIST_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const playlist = app.make({ new: "playlist", withProperties: { name: argv[1] } });
    return JSON.stringify({ id: playlist.persistentID(), name: playlist.name() });
}
"#;

pub fn create_playlist(osa: &Osascript, name: &str) -> Result<PlaylistRef, OsaError> {
    osa.run_json("create playlist", CREATE_PLAYLIST_SCRIPT, &[name])
}

/* ---------- Playlist items (tracks) ---------- */

const PLAYLIST_TRACKS_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const playlist = app.userPlaylists.whose({ persistentID: argv[1] })()[0];
    return JSON.stringify(playlist.tracks().map(t => ({
        id: t.persistentID(),
        name: t.name(),
        artist: t.artist() || null,
        album: t.album() || null,
    })));
}
"#;

pub fn get_playlist_tracks(osa: &Osascript, playlist_id: &str) -> Result<Vec<TrackRef>, OsaError> {
    osa.run_json("playlist tracks", PLAYLIST_TRACKS_SCRIPT, &[playlist_id])
}

const DELETE_TRACKS_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const playlist = app.userPlaylists.whose({ persistentID: argv[1] })()[0];
    argv.slice(2).forEach(id => app.delete(playlist.tracks.whose({ persistentID: id })));
    return "";
}
"#;

/// Removes the given tracks from a playlist. Library tracks are untouched.
pub fn delete_playlist_tracks(
    osa: &Osascript,
    playlist_id: &str,
    track_ids: &[&str],
) -> Result<(), OsaError> {
    if track_ids.is_empty() {
        log::debug!("Playlist {} is already empty", playlist_id);
        return Ok(());
    }

    // A whose filter removes every entry with the id, so repeats are redundant
    let mut ids: Vec<&str> = Vec::with_capacity(track_ids.len());
    for id in track_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }

    let mut args = Vec::with_capacity(ids.len() + 1);
    args.push(playlist_id);
    args.extend(ids);
    osa.run("delete tracks", DELETE_TRACKS_SCRIPT, &args)?;
    Ok(())
}

/* ---------- Properties and playback ---------- */

const PLAYLIST_DURATION_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const playlist = app.userPlaylists.whose({ persistentID: argv[1] })()[0];
    return JSON.stringify(playlist.duration());
}
"#;

pub fn get_playlist_duration(osa: &Osascript, playlist_id: &str) -> Result<Duration, OsaError> {
    let secs: f64 = osa.run_json("playlist duration", PLAYLIST_DURATION_SCRIPT, &[playlist_id])?;
    Ok(Duration::try_from_secs_f64(secs).unwrap_or_else(|_| {
        log::warn!("Playlist {} reported an invalid duration: {}", playlist_id, secs);
        Duration::ZERO
    }))
}

const PLAY_PLAYLIST_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const playlist = app.userPlaylists.whose({ persistentID: argv[1] })()[0];
    app.play(playlist);
    return "";
}
"#;

pub fn play_playlist(osa: &Osascript, playlist_id: &str) -> Result<(), OsaError> {
    osa.run("play playlist", PLAY_PLAYLIST_SCRIPT, &[playlist_id])?;
    Ok(())
}
