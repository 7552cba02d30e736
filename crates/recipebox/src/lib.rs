//! `recipebox` - A personal recipe catalog
//!
//! This library provides SQLite-backed recipe storage, the controller that
//! validates and orchestrates recipe operations, and the terminal and web
//! front ends built on top of them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod storage;
pub mod web;

pub use config::Config;
pub use controller::{ActivityLevel, ActivitySink, MemorySink, RecipeController, TracingSink};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recipe::Recipe;
pub use storage::Storage;
