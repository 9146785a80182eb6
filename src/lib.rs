#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod logging;
pub mod models;
pub mod components;
pub mod storage;
pub mod import;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod interaction;

pub use components::app::App;
