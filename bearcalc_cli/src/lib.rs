//! # bearcalc_cli
//!
//! Library side of the `bearcalc` binary: argument definitions, layered
//! configuration, logging setup and the command handlers.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
