pub mod app;
pub mod game;
pub mod helpers;
pub mod logging;
pub mod settings;
pub mod ui;
