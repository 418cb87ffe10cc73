pub mod battle;
pub mod classify;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod generator;
pub mod logging;
pub mod ranking;
pub mod server;
pub mod store;

pub use error::{Error, Result};
