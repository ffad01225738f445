use std::{env, path::PathBuf, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tour_planner_api::config::PlannerConfig;
use tour_planner_api::db::fixtures::create_fixture_store;
use tour_planner_api::routes;
use tour_planner_api::services::guess_game_service::GameStore;
use tour_planner_api::services::itinerary_generation_service::ItineraryGenerator;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let fixture_dir = env::var("FIXTURE_DIR").ok().map(PathBuf::from);
    let store = create_fixture_store(fixture_dir.as_deref())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

    let config = PlannerConfig::from_env();
    log::info!(
        "Planner config: up to {} days, {} minute days starting {}, {:?} partition",
        config.max_days,
        config.day_ceiling_minutes,
        config.day_start.format("%H:%M"),
        config.partition
    );

    let generator = Arc::new(ItineraryGenerator::with_config(store.clone(), config));
    let games = Arc::new(GameStore::new());

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(generator.clone()))
            .app_data(web::Data::new(games.clone()))
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
