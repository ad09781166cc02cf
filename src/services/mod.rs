pub mod music_app;
pub mod search_term;
