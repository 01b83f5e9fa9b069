use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::{debug, info};
use uuid::Uuid;

use crate::metrics::HitCounter;

/// Logging middleware for request/response tracking
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = get_client_ip(&request);

    info!(
        target: "chirpy::middleware",
        request_id = %request_id,
        method = %method,
        path = %path,
        client_ip = %client_ip,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        target: "chirpy::middleware",
        request_id = %request_id,
        method = %method,
        path = %path,
        status = %response.status(),
        "Request completed"
    );

    response
}

/// Counts every request that reaches the static file server
pub async fn metrics_inc(State(hits): State<HitCounter>, request: Request, next: Next) -> Response {
    let total = hits.increment();
    debug!(target: "chirpy::middleware", hits = total, path = %request.uri().path(), "File server hit");
    next.run(request).await
}

fn get_client_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next() {
                return first_ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = request.headers().get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    // Present when served through `into_make_service_with_connect_info`
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        addr.ip().to_string()
    } else {
        "unknown".to_string()
    }
}
