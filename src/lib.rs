//! devops-info-service: a small HTTP service reporting its identity, host
//! facts, uptime and request details as JSON, plus a liveness endpoint.

pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod system;

pub use error::*;
