// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod file;
pub mod job;
pub mod link;
pub mod pipeline;
pub mod progress;
pub mod recency;
pub mod runner;
pub mod sheet;
pub mod store;

pub use error::{Result, ScrapeError};
