//! Package catalog rendering and table interaction.
//!
//! `render` turns one package record into an escaped detail panel, and
//! `controller` drives a grid's row expansion and search filter from UI
//! events. `feed` absorbs schema drift in the JSON feed; `page` and `session`
//! are the static-page and scripted-replay front ends.
pub mod config;
pub mod controller;
pub mod feed;
pub mod grid;
pub mod page;
pub mod record;
pub mod render;
pub mod session;
pub mod util;
