use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::preferences::BudgetTier;

const MAX_TRIP_DAYS: u8 = 3;
const DAY_CEILING_MINUTES: u32 = 480; // 8 hours
const DAY_START_HOUR: u32 = 10;
const VISIT_BUFFER_MINUTES: u32 = 30;
const AVERAGE_SPEED_KMH: f64 = 25.0; // includes transfers and waiting
const PROXIMITY_RADIUS_KM: f64 = 15.0;
const MISC_PERCENT: u32 = 10;
const ACCOMMODATION_NIGHTLY_ESTIMATE: u32 = 3000;
const MAX_RAINY_ALTERNATIVES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// `ceil(n / days)` candidates per day.
    Even,
    /// Three candidates on day one, two on each later day.
    FrontLoaded,
}

impl FromStr for PartitionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "even" => Ok(PartitionStrategy::Even),
            "front_loaded" | "front-loaded" => Ok(PartitionStrategy::FrontLoaded),
            other => Err(format!("unknown partition strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub max_days: u8,
    pub day_ceiling_minutes: u32,
    pub day_start: NaiveTime,
    pub visit_buffer_minutes: u32,
    pub average_speed_kmh: f64,
    pub proximity_radius_km: f64,
    pub misc_percent: u32,
    pub accommodation_nightly_estimate: u32,
    pub meal_cost_low: u32,
    pub meal_cost_medium: u32,
    pub meal_cost_high: u32,
    pub partition: PartitionStrategy,
    pub max_rainy_alternatives: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_days: MAX_TRIP_DAYS,
            day_ceiling_minutes: DAY_CEILING_MINUTES,
            day_start: NaiveTime::from_hms_opt(DAY_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
            visit_buffer_minutes: VISIT_BUFFER_MINUTES,
            average_speed_kmh: AVERAGE_SPEED_KMH,
            proximity_radius_km: PROXIMITY_RADIUS_KM,
            misc_percent: MISC_PERCENT,
            accommodation_nightly_estimate: ACCOMMODATION_NIGHTLY_ESTIMATE,
            meal_cost_low: 400,
            meal_cost_medium: 800,
            meal_cost_high: 1200,
            partition: PartitionStrategy::Even,
            max_rainy_alternatives: MAX_RAINY_ALTERNATIVES,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl PlannerConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let day_start = std::env::var("PLANNER_DAY_START")
            .ok()
            .and_then(|s| NaiveTime::parse_from_str(s.trim(), "%H:%M").ok())
            .unwrap_or(defaults.day_start);

        let speed = env_or("PLANNER_AVERAGE_SPEED_KMH", defaults.average_speed_kmh);
        let average_speed_kmh = if speed > 0.0 {
            speed
        } else {
            defaults.average_speed_kmh
        };

        Self {
            max_days: env_or("PLANNER_MAX_DAYS", defaults.max_days).max(1),
            day_ceiling_minutes: env_or("PLANNER_DAY_CEILING_MINUTES", defaults.day_ceiling_minutes),
            day_start,
            visit_buffer_minutes: env_or("PLANNER_VISIT_BUFFER_MINUTES", defaults.visit_buffer_minutes),
            average_speed_kmh,
            proximity_radius_km: env_or("PLANNER_PROXIMITY_RADIUS_KM", defaults.proximity_radius_km),
            misc_percent: env_or("PLANNER_MISC_PERCENT", defaults.misc_percent),
            accommodation_nightly_estimate: env_or(
                "PLANNER_ACCOMMODATION_NIGHTLY",
                defaults.accommodation_nightly_estimate,
            ),
            meal_cost_low: env_or("PLANNER_MEAL_COST_LOW", defaults.meal_cost_low),
            meal_cost_medium: env_or("PLANNER_MEAL_COST_MEDIUM", defaults.meal_cost_medium),
            meal_cost_high: env_or("PLANNER_MEAL_COST_HIGH", defaults.meal_cost_high),
            partition: env_or("PLANNER_PARTITION", defaults.partition),
            max_rainy_alternatives: env_or(
                "PLANNER_MAX_RAINY_ALTERNATIVES",
                defaults.max_rainy_alternatives,
            ),
        }
    }

    /// Flat per-day meal estimate for the given budget tier.
    pub fn meal_estimate(&self, tier: BudgetTier) -> u32 {
        match tier {
            BudgetTier::Low => self.meal_cost_low,
            BudgetTier::Medium => self.meal_cost_medium,
            BudgetTier::High => self.meal_cost_high,
        }
    }
}
