//! Core domain + application logic for the YouTube search Telegram bot.
//!
//! This crate is framework-agnostic. Telegram and the YouTube results page
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod history;
pub mod intent;
pub mod logging;
pub mod messaging;
pub mod search;

pub use errors::{Error, Result};
