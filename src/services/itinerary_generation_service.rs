use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::db::fixtures::FixtureStore;
use crate::error::PlannerError;
use crate::models::attraction::Attraction;
use crate::models::itinerary::{
    checked_sum, DayPlan, Itinerary, ItineraryVariant, RainyAlternative,
};
use crate::models::preferences::{PlanningCriteria, UserPreferences};
use crate::models::LocalizedText;
use crate::services::day_packer_service::DayPacker;
use crate::services::logistics_service::LogisticsService;
use crate::services::preference_filter_service::PreferenceFilter;
use crate::services::pricing_service::PricingService;
use crate::services::rainy_day_service::RainyDayService;
use crate::services::route_optimization_service::RouteOptimizationService;
use crate::services::sequencer::{SeedSource, SeededRandom};

pub struct ItineraryGenerator {
    store: Arc<FixtureStore>,
    config: PlannerConfig,
    packer: DayPacker,
    route_optimizer: RouteOptimizationService,
}

impl ItineraryGenerator {
    pub fn new(store: Arc<FixtureStore>) -> Self {
        Self::with_config(store, PlannerConfig::default())
    }

    pub fn with_config(store: Arc<FixtureStore>, config: PlannerConfig) -> Self {
        let packer = DayPacker::new(&config);
        let route_optimizer = RouteOptimizationService::new(config.proximity_radius_km);
        Self {
            store,
            config,
            packer,
            route_optimizer,
        }
    }

    /// Generate a new itinerary from the traveller's preferences
    pub fn generate(&self, preferences: &UserPreferences) -> Result<Itinerary, PlannerError> {
        let criteria = preferences.validate(&self.config)?;

        let seed = SeedSource::from_option(preferences.seed.as_deref()).resolve();
        let mut rng = SeededRandom::new(&seed);

        let filtered = PreferenceFilter::apply(self.store.attractions(), &criteria)?;
        log::info!(
            "Planning {} day(s) from {} candidate attractions (seed {}, relaxed: {})",
            criteria.days,
            filtered.candidates.len(),
            seed,
            filtered.relaxed
        );

        let mut candidates = filtered.candidates;
        rng.shuffle(&mut candidates);
        let ordered = self.route_optimizer.order_by_proximity(candidates);

        let meal_cost = self.config.meal_estimate(criteria.budget_tier);
        let mut days = self.packer.pack(&ordered, criteria.days, meal_cost)?;

        let accommodation = LogisticsService::select_accommodation(
            self.store.accommodations(),
            &criteria,
            &mut rng,
        );
        let nights = days.len().saturating_sub(1);
        for day in days.iter_mut().take(nights) {
            day.accommodation = accommodation.clone();
        }

        self.attach_transport(&mut days, &criteria);
        self.attach_rainy_alternatives(&mut days, &ordered);

        for day in days.iter_mut() {
            day.refresh_totals()?;
            day.notes = self.packer.day_notes(day, filtered.relaxed);
        }

        let itinerary = self.assemble(seed, &criteria, days, filtered.relaxed)?;
        log::info!(
            "Generated itinerary {} with {} activities, total budget {} RUB",
            itinerary.id,
            itinerary.days.iter().map(|d| d.activities.len()).sum::<usize>(),
            itinerary.budget.total
        );

        Ok(itinerary)
    }

    /// Rainy-day variant of an existing itinerary
    pub fn rainy_day(&self, itinerary: &Itinerary) -> Result<Itinerary, PlannerError> {
        RainyDayService::new(&self.config).derive(itinerary)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The first visit of each day gets the leg from Saint Petersburg.
    fn attach_transport(&self, days: &mut [DayPlan], criteria: &PlanningCriteria) {
        for day in days.iter_mut() {
            if let Some(first) = day.activities.first_mut() {
                first.transport = LogisticsService::transport_leg_for(
                    &first.attraction,
                    self.store.transport(),
                    criteria.wheelchair_required,
                );
            }
        }
    }

    /// Spread unscheduled, weather-proof candidates over the days.
    fn attach_rainy_alternatives(&self, days: &mut [DayPlan], ordered: &[Attraction]) {
        let scheduled: HashSet<&str> = days
            .iter()
            .flat_map(|day| day.activities.iter())
            .map(|a| a.attraction.id.as_str())
            .collect();

        let mut pool: Vec<RainyAlternative> = ordered
            .iter()
            .filter(|a| !scheduled.contains(a.id.as_str()) && a.suits_rainy_day())
            .map(|a| RainyAlternative {
                attraction_id: a.id.clone(),
                name: a.name.clone(),
                city: a.location.city.clone(),
                visit_duration_minutes: a.visit_duration_minutes,
                ticket_price: a.ticket_price.senior,
            })
            .collect();
        pool.reverse();

        for day in days.iter_mut() {
            for _ in 0..self.config.max_rainy_alternatives {
                match pool.pop() {
                    Some(alternative) => day.rainy_alternatives.push(alternative),
                    None => return,
                }
            }
        }
    }

    fn assemble(
        &self,
        seed: String,
        criteria: &PlanningCriteria,
        days: Vec<DayPlan>,
        relaxed_constraints: bool,
    ) -> Result<Itinerary, PlannerError> {
        let budget = PricingService::estimate(&days, &self.config)?;
        let total_duration_minutes = checked_sum(
            days.iter().map(|d| d.total_duration_minutes),
            "itinerary duration",
        )?;
        let total_cost = checked_sum(days.iter().map(|d| d.total_cost), "itinerary cost")?;

        let mut cities: Vec<&LocalizedText> = Vec::new();
        for activity in days.iter().flat_map(|d| d.activities.iter()) {
            let city = &activity.attraction.location.city;
            if !cities.contains(&city) {
                cities.push(city);
            }
        }
        let cities_ru: Vec<&str> = cities.iter().map(|c| c.ru.as_str()).collect();
        let cities_en: Vec<&str> = cities.iter().map(|c| c.en.as_str()).collect();

        let description = if cities.is_empty() {
            LocalizedText::new(
                "Спокойная поездка без насыщенной программы",
                "A relaxed trip without a packed schedule",
            )
        } else {
            LocalizedText::new(
                format!("Комфортный маршрут для пожилых путешественников: {}", cities_ru.join(", ")),
                format!("A comfortable route for senior travellers: {}", cities_en.join(", ")),
            )
        };

        Ok(Itinerary {
            id: Uuid::new_v4().to_string(),
            variant: ItineraryVariant::Standard,
            seed,
            title: LocalizedText::new(
                format!("Ленинградская область: {} дн.", criteria.days),
                format!("Leningrad Oblast in {} day(s)", criteria.days),
            ),
            description,
            total_duration_minutes,
            total_cost,
            budget,
            accessibility_score: Itinerary::accessibility_score_of(&days),
            comfort_rating: Itinerary::comfort_rating_of(&days),
            relaxed_constraints,
            created_at: Utc::now(),
            days,
        })
    }
}
