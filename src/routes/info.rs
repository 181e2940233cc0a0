//! Root endpoint: service identity, host facts, uptime and request details.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts, State},
    http::{header::USER_AGENT, request::Parts, HeaderMap, Method, Uri},
    Json,
};
use serde::Serialize;

use crate::clock::iso_utc_now;
use crate::config::FRAMEWORK;
use crate::error::AppError;
use crate::state::AppState;
use crate::system::SystemInfo;

/// Placeholder for request facts that cannot be determined.
pub const UNKNOWN: &str = "unknown";

/// Routes advertised in the `endpoints` section.
pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        path: "/",
        method: "GET",
        description: "Service information",
    },
    Endpoint {
        path: "/health",
        method: "GET",
        description: "Health check",
    },
];

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: ServiceSection,
    pub system: SystemInfo,
    pub runtime: RuntimeSection,
    pub request: RequestSection,
    pub endpoints: &'static [Endpoint],
}

#[derive(Debug, Serialize)]
pub struct ServiceSection {
    pub name: String,
    pub version: String,
    pub description: String,
    pub framework: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RuntimeSection {
    pub uptime_seconds: u64,
    pub uptime_human: String,
    pub current_time: String,
    pub timezone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RequestSection {
    pub client_ip: String,
    pub user_agent: String,
    pub method: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

/// Peer address of the connection, if the server recorded one.
///
/// Absent when the router is served without connect info (e.g. in tests).
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientIp(ip))
    }
}

/// Service information handler.
pub async fn index(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<ServiceInfo>, AppError> {
    let system = SystemInfo::gather()?;
    let uptime = state.clock.uptime();
    let service = &state.config.service;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN);

    tracing::debug!(uptime_seconds = uptime.seconds, "Serving service information");

    Ok(Json(ServiceInfo {
        service: ServiceSection {
            name: service.name.clone(),
            version: service.version.clone(),
            description: service.description.clone(),
            framework: FRAMEWORK,
        },
        system,
        runtime: RuntimeSection {
            uptime_seconds: uptime.seconds,
            uptime_human: uptime.human,
            current_time: iso_utc_now(),
            timezone: "UTC",
        },
        request: RequestSection {
            client_ip: client_ip.map_or_else(|| UNKNOWN.to_string(), |ip| ip.to_string()),
            user_agent: user_agent.to_string(),
            method: method.to_string(),
            path: uri.path().to_string(),
        },
        endpoints: ENDPOINTS,
    }))
}
