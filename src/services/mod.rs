pub mod day_packer_service;
pub mod distance_service;
pub mod guess_game_service;
pub mod itinerary_generation_service;
pub mod logistics_service;
pub mod preference_filter_service;
pub mod pricing_service;
pub mod rainy_day_service;
pub mod route_optimization_service;
pub mod sequencer;
