use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;

use crate::db::DocumentStore;

#[derive(Serialize)]
struct StoreStatus {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Ping the store and answer 200 with `up`, or 503 with `down` and the cause
async fn report(store: &dyn DocumentStore, check: &str, up: &'static str, down: &'static str) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(StoreStatus {
            status: up,
            database: "connected",
            error: None,
        }),
        Err(e) => {
            error!("{} check failed: {}", check, e);
            HttpResponse::ServiceUnavailable().json(StoreStatus {
                status: down,
                database: "disconnected",
                error: Some(e.to_string()),
            })
        }
    }
}

#[get("/health")]
async fn health_check(store: web::Data<dyn DocumentStore>) -> impl Responder {
    report(store.get_ref(), "Health", "healthy", "unhealthy").await
}

/// Same ping as `/health`. Routes are never served before the first
/// successful ping, so this only turns `not_ready` if the store drops later.
#[get("/ready")]
async fn readiness_check(store: web::Data<dyn DocumentStore>) -> impl Responder {
    report(store.get_ref(), "Readiness", "ready", "not_ready").await
}

#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(StoreStatus {
        status: "alive",
        database: "not_checked",
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
