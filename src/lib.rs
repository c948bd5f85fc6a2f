//! Reporting tools for an ICON-style validator network.
//!
//! `status` polls every registered validator node and prints a colorized
//! liveness/version table, `scan` walks blocks and prints the transactions
//! that match a set of filters.

// import external crates
#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;

// list all modules
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod nodes;
pub mod scan;
pub mod status;
pub mod style;
pub mod utils;
pub mod version;

pub use client::{ChainClient, JsonRpcClient};
pub use command::Command;
pub use config::Config;
pub use error::ReportError;

pub type Result<T> = std::result::Result<T, failure::Error>;
