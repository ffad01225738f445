use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::accommodation::Accommodation;
use super::attraction::Attraction;
use super::transport::TransportMode;
use super::LocalizedText;
use crate::error::PlannerError;

/// Sum of `values`, or an internal error naming `what` if it leaves `u32`.
pub fn checked_sum<I>(values: I, what: &str) -> Result<u32, PlannerError>
where
    I: IntoIterator<Item = u32>,
{
    values
        .into_iter()
        .try_fold(0u32, u32::checked_add)
        .ok_or_else(|| PlannerError::Internal(format!("{} overflowed", what)))
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportLeg {
    pub transport_id: String,
    pub mode: TransportMode,
    pub from: LocalizedText,
    pub to: LocalizedText,
    pub duration_minutes: u32,
    /// Senior fare in rubles.
    pub price: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScheduledActivity {
    pub attraction: Attraction,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub travel_minutes_from_previous: u32,
    pub travel_km_from_previous: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportLeg>,
    pub notes: LocalizedText,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RainyAlternative {
    pub attraction_id: String,
    pub name: LocalizedText,
    pub city: LocalizedText,
    pub visit_duration_minutes: u32,
    pub ticket_price: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u8,
    pub activities: Vec<ScheduledActivity>,
    pub visit_minutes: u32,
    pub travel_minutes: u32,
    pub total_duration_minutes: u32,
    pub walking_km: f64,
    pub ticket_cost: u32,
    pub transport_cost: u32,
    pub meal_cost: u32,
    pub total_cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    #[serde(default)]
    pub rainy_alternatives: Vec<RainyAlternative>,
    #[serde(default)]
    pub notes: Vec<LocalizedText>,
}

impl DayPlan {
    pub fn new(
        day: u8,
        activities: Vec<ScheduledActivity>,
        meal_cost: u32,
    ) -> Result<Self, PlannerError> {
        let mut plan = Self {
            day,
            activities,
            visit_minutes: 0,
            travel_minutes: 0,
            total_duration_minutes: 0,
            walking_km: 0.0,
            ticket_cost: 0,
            transport_cost: 0,
            meal_cost,
            total_cost: 0,
            accommodation: None,
            rainy_alternatives: Vec::new(),
            notes: Vec::new(),
        };
        plan.refresh_totals()?;
        Ok(plan)
    }

    /// Recompute every aggregate from the activity list.
    pub fn refresh_totals(&mut self) -> Result<(), PlannerError> {
        let day = self.day;
        let activities = &self.activities;

        self.visit_minutes = checked_sum(
            activities.iter().map(|a| a.attraction.visit_duration_minutes),
            &format!("day {} visit minutes", day),
        )?;
        self.travel_minutes = checked_sum(
            activities.iter().map(|a| a.travel_minutes_from_previous),
            &format!("day {} travel minutes", day),
        )?;
        self.total_duration_minutes = checked_sum(
            [self.visit_minutes, self.travel_minutes],
            &format!("day {} duration", day),
        )?;
        self.walking_km = activities
            .iter()
            .map(|a| a.attraction.accessibility.walking_distance.approx_km())
            .sum();
        self.ticket_cost = checked_sum(
            activities.iter().map(|a| a.attraction.ticket_price.senior),
            &format!("day {} ticket cost", day),
        )?;
        self.transport_cost = checked_sum(
            activities
                .iter()
                .filter_map(|a| a.transport.as_ref().map(|leg| leg.price)),
            &format!("day {} transport cost", day),
        )?;
        self.total_cost = checked_sum(
            [self.ticket_cost, self.transport_cost, self.meal_cost],
            &format!("day {} total cost", day),
        )?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetBreakdown {
    pub entrance_fees: u32,
    pub transport: u32,
    pub meals: u32,
    pub accommodation: u32,
    pub misc: u32,
    pub total: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItineraryVariant {
    #[default]
    Standard,
    RainyDay,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Itinerary {
    pub id: String,
    #[serde(default)]
    pub variant: ItineraryVariant,
    /// Effective seed; replaying it reproduces the same schedule.
    pub seed: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub days: Vec<DayPlan>,
    pub total_duration_minutes: u32,
    pub total_cost: u32,
    pub budget: BudgetBreakdown,
    pub accessibility_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comfort_rating: Option<u8>,
    #[serde(default)]
    pub relaxed_constraints: bool,
    pub created_at: DateTime<Utc>,
}

impl Itinerary {
    /// Mean of per-day mean attraction scores, skipping empty days.
    pub fn accessibility_score_of(days: &[DayPlan]) -> u32 {
        let day_scores: Vec<f64> = days
            .iter()
            .filter(|day| !day.is_empty())
            .map(|day| {
                let sum: f64 = day
                    .activities
                    .iter()
                    .map(|a| f64::from(a.attraction.accessibility.score()))
                    .sum();
                sum / day.activities.len() as f64
            })
            .collect();

        if day_scores.is_empty() {
            return 0;
        }
        (day_scores.iter().sum::<f64>() / day_scores.len() as f64).round() as u32
    }

    /// Lowest comfort rating among scheduled attractions.
    pub fn comfort_rating_of(days: &[DayPlan]) -> Option<u8> {
        days.iter()
            .flat_map(|day| day.activities.iter())
            .map(|a| a.attraction.accessibility.comfort_rating)
            .min()
    }

    /// Ids of scheduled attractions, day by day, in visiting order.
    pub fn attraction_order(&self) -> Vec<Vec<String>> {
        self.days
            .iter()
            .map(|day| {
                day.activities
                    .iter()
                    .map(|a| a.attraction.id.clone())
                    .collect()
            })
            .collect()
    }
}
