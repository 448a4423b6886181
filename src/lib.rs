//! tasktube - TaskTube terminal client library
//!
//! This library backs the `tasktube` binary, a terminal UI over a
//! remote task API. The backend owns persistence; the client keeps an
//! in-memory mirror of the task list that is replaced wholesale by a
//! full re-fetch after every successful mutation.
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `tasktube.toml`
//! - `error`: error types and result aliases
//! - `task`: wire types and display filters
//! - `transport`: HTTP client for the five task operations
//! - `ui`: the ratatui viewer (store, filter engine, editor, views)

pub mod cli;
pub mod config;
pub mod error;
pub mod task;
pub mod transport;
pub mod ui;

pub use error::{Error, Result};
