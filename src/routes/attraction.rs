use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::fixtures::FixtureStore;
use crate::error::{FieldError, PlannerError};
use crate::models::attraction::{Attraction, Category};

#[derive(Deserialize)]
pub struct AttractionQuery {
    category: Option<String>,
    city: Option<String>,
    wheelchair: Option<bool>,
}

/*
    /api/attractions?category=museum&city=Pushkin&wheelchair=true
*/
pub async fn get_attractions(
    params: web::Query<AttractionQuery>,
    store: web::Data<Arc<FixtureStore>>,
) -> Result<HttpResponse, PlannerError> {
    let category = match params.category.as_deref() {
        Some(raw) => Some(raw.parse::<Category>().map_err(|_| {
            PlannerError::Validation(vec![FieldError::new(
                "category",
                &format!("Неизвестная категория: {}", raw),
                &format!("Unknown category: {}", raw),
            )])
        })?),
        None => None,
    };

    let attractions: Vec<&Attraction> = store
        .attractions()
        .iter()
        .filter(|a| category.map_or(true, |c| a.category == c))
        .filter(|a| {
            params.city.as_deref().map_or(true, |city| {
                a.location.city.en.eq_ignore_ascii_case(city) || a.location.city.ru == city
            })
        })
        .filter(|a| !params.wheelchair.unwrap_or(false) || a.accessibility.wheelchair_accessible)
        .collect();

    Ok(HttpResponse::Ok().json(attractions))
}

/*
    /api/attractions/{id}
*/
pub async fn get_attraction(
    path: web::Path<String>,
    store: web::Data<Arc<FixtureStore>>,
) -> HttpResponse {
    let id = path.into_inner();
    match store.attraction(&id) {
        Some(attraction) => HttpResponse::Ok().json(attraction),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "ok": false,
            "error": {
                "ru": "Место не найдено",
                "en": "Attraction not found"
            }
        })),
    }
}

/*
    /api/accommodations
*/
pub async fn get_accommodations(store: web::Data<Arc<FixtureStore>>) -> HttpResponse {
    HttpResponse::Ok().json(store.accommodations())
}

/*
    /api/transport
*/
pub async fn get_transport(store: web::Data<Arc<FixtureStore>>) -> HttpResponse {
    HttpResponse::Ok().json(store.transport())
}
