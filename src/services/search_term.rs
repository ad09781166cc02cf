use color_eyre::eyre::{Result, eyre};

/// Characters the host's library search chokes on.
const STRIPPED_CHARS: [char; 2] = [':', '&'];

/// Builds a library search term from an artist and album pair.
pub fn search_term(artist: &str, album: &str) -> String {
    format!("{} {}", artist.trim(), album.trim()).replace(STRIPPED_CHARS, "")
}

/// Trims a query and rejects it when nothing is left.
pub fn normalize_query(query: &str) -> Result<String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(eyre!("Search query is empty"));
    }
    Ok(query.to_string())
}
