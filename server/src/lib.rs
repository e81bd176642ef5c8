//! HTTP server for kvshelf.
//!
//! This crate exposes the storage contract as a REST API: namespace
//! listing at the root, whole-namespace reads and deletes, and per-entry
//! get/set/delete, plus health probes and Prometheus metrics. All
//! responses are JSON; absence of an entry is a successful response, never
//! a 404.

mod config;
mod error;
mod handlers;
mod metrics;
mod middleware;
mod request;
mod response;
mod server;

pub mod testing;

pub use config::{CliArgs, ServerConfig};
pub use server::StoreServer;
