//! Yesterday's stories from a fixed set of design publications, ranked
//! newest first, with a short-lived cache painted while feeds reload.

pub mod cache;
pub mod config;
pub mod news;
pub mod open_url;
pub mod present;
pub mod terminal;
pub mod ui;
pub mod util;
pub mod window;
