#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use tour_planner_api::config::PlannerConfig;
use tour_planner_api::db::fixtures::{create_fixture_store, FixtureStore};
use tour_planner_api::routes;
use tour_planner_api::services::guess_game_service::GameStore;
use tour_planner_api::services::itinerary_generation_service::ItineraryGenerator;

pub struct TestApp {
    pub store: Arc<FixtureStore>,
    pub generator: Arc<ItineraryGenerator>,
    pub games: Arc<GameStore>,
}

impl TestApp {
    /// App backed by the embedded fixture data.
    pub async fn new() -> Self {
        let store = create_fixture_store(None).expect("embedded fixtures should load");
        Self::with_store(store)
    }

    /// App backed by hand-written fixture tables.
    pub fn with_fixtures(attractions: Value, accommodations: Value, transport: Value) -> Self {
        let store = FixtureStore::from_json(
            &attractions.to_string(),
            &accommodations.to_string(),
            &transport.to_string(),
        )
        .expect("test fixtures should be valid");
        Self::with_store(Arc::new(store))
    }

    fn with_store(store: Arc<FixtureStore>) -> Self {
        let generator = Arc::new(ItineraryGenerator::with_config(
            store.clone(),
            PlannerConfig::default(),
        ));
        Self {
            store,
            generator,
            games: Arc::new(GameStore::new()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.generator.clone()))
            .app_data(web::Data::new(self.games.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}

/// Minimal attraction record; fully accessible, indoor, in Pushkin.
pub fn attraction_json(id: &str, minutes: u32, senior_price: u32, wheelchair: bool) -> Value {
    json!({
        "id": id,
        "name": { "ru": id, "en": id },
        "description": { "ru": "", "en": "" },
        "location": {
            "city": { "ru": "Пушкин", "en": "Pushkin" },
            "lat": 59.716,
            "lng": 30.3957
        },
        "category": "museum",
        "accessibility": {
            "wheelchair_accessible": wheelchair,
            "has_elevator": wheelchair,
            "stairs_level": "low",
            "resting_areas": true,
            "accessible_toilets": wheelchair,
            "walking_distance": "short",
            "comfort_rating": 4
        },
        "visit_duration_minutes": minutes,
        "ticket_price": { "standard": senior_price * 2, "senior": senior_price },
        "weather_dependent": false,
        "rainy_day_suitable": true,
        "tags": []
    })
}
