pub mod music_app;
