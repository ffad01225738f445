use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::error::PlannerError;
use crate::models::itinerary::Itinerary;
use crate::models::preferences::UserPreferences;
use crate::services::itinerary_generation_service::ItineraryGenerator;

/*
    /api/itineraries/generate
*/
pub async fn generate(
    preferences: web::Json<UserPreferences>,
    generator: web::Data<Arc<ItineraryGenerator>>,
) -> Result<HttpResponse, PlannerError> {
    let preferences = preferences.into_inner();

    match generator.generate(&preferences) {
        Ok(itinerary) => Ok(HttpResponse::Ok().json(itinerary)),
        Err(err) => {
            if err.is_empty_result() {
                log::info!("No itinerary possible for {:?}", preferences);
            } else {
                log::warn!("Itinerary generation rejected: {}", err);
            }
            Err(err)
        }
    }
}

/*
    /api/itineraries/rainy-day
*/
pub async fn rainy_day(
    itinerary: web::Json<Itinerary>,
    generator: web::Data<Arc<ItineraryGenerator>>,
) -> Result<HttpResponse, PlannerError> {
    let rainy = generator.rainy_day(&itinerary)?;
    Ok(HttpResponse::Ok().json(rainy))
}
