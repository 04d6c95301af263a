//! Notion Herald - polls Notion databases and announces changes on Discord.
//!
//! This library provides the domain types, the pure diff/transition logic,
//! the HTTP clients and the polling loop. The binary wires them together.

pub mod config;
pub mod persistence;
pub mod properties;
pub mod server;
pub mod sink;
pub mod sleep;
pub mod source;
pub mod state;
pub mod types;
pub mod watcher;

#[cfg(test)]
mod test_utils;
