pub mod cli;
pub mod config;
pub mod database;
pub mod embedding;
pub mod models;
pub mod nlp;
pub mod services;
pub mod web;

pub mod env;
pub mod error;
pub mod logging;

pub use error::{Result, SaberError};
pub use logging::{init_logging, LoggingConfig};
