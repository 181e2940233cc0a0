//! HTTP server module.
//!
//! Serves the router over plain HTTP with peer addresses recorded for each
//! connection, and drains in-flight requests on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
