use crate::osa::{OsaError, Osascript};
use crate::ports::music_app::{LibraryRef, SearchScope, TrackRef};

/* ---------- Libraries ---------- */

const LIST_LIBRARIES_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    return JSON.stringify(app.libraryPlaylists().map(p => ({
        id: p.persistentID(),
        name: p.name(),
    })));
}
"#;

pub fn list_libraries(osa: &Osascript) -> Result<Vec<LibraryRef>, OsaError> {
    osa.run_json("libraries", LIST_LIBRARIES_SCRIPT, &[])
}

/* ---------- Search ---------- */

// `search` yields no list at all when nothing matches.
const SEARCH_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const library = app.libraryPlaylists.whose({ persistentID: argv[1] })()[0];
    const result = app.search(library, { for: argv[2], only: argv[3] }) || [];
    return JSON.stringify(result.map(t => ({
        id: t.persistentID(),
        name: t.name(),
        artist: t.artist() || null,
        album: t.album() || null,
    })));
}
"#;

pub fn search_library(
    osa: &Osascript,
    library_id: &str,
    query: &str,
    scope: SearchScope,
) -> Result<Vec<TrackRef>, OsaError> {
    osa.run_json("search", SEARCH_SCRIPT, &[library_id, query, scope.as_str()])
}

/* ---------- Duplicate ---------- */

const DUPLICATE_SCRIPT: &str = r#"
function run(argv) {
    const app = Application(argv[0]);
    const track = app.libraryPlaylists()[0].tracks.whose({ persistentID: argv[1] })()[0];
    const playlist = app.userPlaylists.whose({ persistentID: argv[2] })()[0];
    app.duplicate(track, { to: playlist });
    return "";
}
"#;

/// Copies a library track to the end of a user playlist.
pub fn duplicate_track(
    osa: &Osascript,
    track_id: &str,
    playlist_id: &str,
) -> Result<(), OsaError> {
    osa.run("duplicate", DUPLICATE_SCRIPT, &[track_id, playlist_id])?;
    Ok(())
}
