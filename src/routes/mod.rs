pub mod attraction;
pub mod game;
pub mod health;
pub mod itinerary;

use actix_web::web;

/// Every route the service exposes, shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/itineraries")
                        .route("/generate", web::post().to(itinerary::generate))
                        .route("/rainy-day", web::post().to(itinerary::rainy_day)),
                )
                .route("/attractions", web::get().to(attraction::get_attractions))
                .route("/attractions/{id}", web::get().to(attraction::get_attraction))
                .route(
                    "/accommodations",
                    web::get().to(attraction::get_accommodations),
                )
                .route("/transport", web::get().to(attraction::get_transport))
                .service(
                    web::scope("/games/{chat_id}")
                        .route("", web::get().to(game::status))
                        .route("/start", web::post().to(game::start))
                        .route("/guess", web::post().to(game::guess)),
                ),
        );
}
