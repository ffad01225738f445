use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::db::fixtures::FixtureStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(store: web::Data<Arc<FixtureStore>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let fixtures = check_fixtures(&store);
    health
        .services
        .insert("fixtures".to_string(), fixtures.clone());

    if fixtures.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_fixtures(store: &FixtureStore) -> ServiceStatus {
    if store.attractions().is_empty() {
        log::warn!("Health check: no attractions loaded");
        return ServiceStatus {
            status: "error".to_string(),
            details: Some("No attractions loaded".to_string()),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "{} attractions, {} accommodations, {} transport options",
            store.attractions().len(),
            store.accommodations().len(),
            store.transport().len()
        )),
    }
}
