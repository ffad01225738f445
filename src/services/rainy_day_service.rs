use crate::config::PlannerConfig;
use crate::error::{FieldError, PlannerError};
use crate::models::attraction::Attraction;
use crate::models::itinerary::{checked_sum, DayPlan, Itinerary, ItineraryVariant};
use crate::services::day_packer_service::DayPacker;
use crate::services::pricing_service::PricingService;

const RAINY_ID_SUFFIX: &str = "_rainy";
const MAX_PRICE_RUB: u32 = 1_000_000;
const MAX_VISIT_MINUTES: u32 = 24 * 60;

pub struct RainyDayService<'a> {
    config: &'a PlannerConfig,
    packer: DayPacker,
}

impl<'a> RainyDayService<'a> {
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self {
            config,
            packer: DayPacker::new(config),
        }
    }

    /// Variant of `itinerary` that keeps only visits that work in bad weather.
    /// Every schedule, total and the budget are rebuilt from what is left, so
    /// applying it to its own output changes nothing.
    pub fn derive(&self, itinerary: &Itinerary) -> Result<Itinerary, PlannerError> {
        self.check_bounds(itinerary)?;

        let days = itinerary
            .days
            .iter()
            .map(|day| self.rebuild_day(day, itinerary.relaxed_constraints))
            .collect::<Result<Vec<DayPlan>, PlannerError>>()?;

        let mut rainy = itinerary.clone();
        if itinerary.variant == ItineraryVariant::Standard {
            rainy.id = format!("{}{}", itinerary.id, RAINY_ID_SUFFIX);
            rainy.title.ru = format!("{} (дождливый день)", itinerary.title.ru);
            rainy.title.en = format!("{} (rainy day)", itinerary.title.en);
            rainy.variant = ItineraryVariant::RainyDay;
        }

        rainy.budget = PricingService::estimate(&days, self.config)?;
        rainy.total_duration_minutes = checked_sum(
            days.iter().map(|d| d.total_duration_minutes),
            "itinerary duration",
        )?;
        rainy.total_cost = checked_sum(days.iter().map(|d| d.total_cost), "itinerary cost")?;
        rainy.accessibility_score = Itinerary::accessibility_score_of(&days);
        rainy.comfort_rating = Itinerary::comfort_rating_of(&days);
        rainy.days = days;

        log::debug!(
            "Derived rainy-day variant {} with {} activities",
            rainy.id,
            rainy.days.iter().map(|d| d.activities.len()).sum::<usize>()
        );

        Ok(rainy)
    }

    /// Reject submitted itineraries whose prices, durations or coordinates
    /// no planner output could contain.
    fn check_bounds(&self, itinerary: &Itinerary) -> Result<(), PlannerError> {
        let mut errors = Vec::new();
        let mut reject = |field: String, ru: &str, en: &str| {
            errors.push(FieldError::new(&field, ru, en));
        };

        if itinerary.days.len() > usize::from(self.config.max_days) {
            reject(
                "days".into(),
                &format!("Не более {} дней", self.config.max_days),
                &format!("At most {} days", self.config.max_days),
            );
        }

        for (d, day) in itinerary.days.iter().enumerate() {
            if day.meal_cost > MAX_PRICE_RUB {
                reject(
                    format!("days[{}].meal_cost", d),
                    "Недопустимая стоимость питания",
                    "Meal cost out of bounds",
                );
            }
            if let Some(accommodation) = &day.accommodation {
                if accommodation.price_per_night.senior > MAX_PRICE_RUB {
                    reject(
                        format!("days[{}].accommodation.price_per_night", d),
                        "Недопустимая цена проживания",
                        "Accommodation price out of bounds",
                    );
                }
            }

            for (i, activity) in day.activities.iter().enumerate() {
                let path = format!("days[{}].activities[{}]", d, i);
                let attraction = &activity.attraction;

                if attraction.ticket_price.senior > MAX_PRICE_RUB {
                    reject(
                        format!("{}.attraction.ticket_price", path),
                        "Недопустимая цена билета",
                        "Ticket price out of bounds",
                    );
                }
                if attraction.visit_duration_minutes > MAX_VISIT_MINUTES {
                    reject(
                        format!("{}.attraction.visit_duration_minutes", path),
                        "Посещение длиннее суток",
                        "Visit longer than a day",
                    );
                }
                let (lat, lng) = attraction.coordinates();
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    reject(
                        format!("{}.attraction.location", path),
                        "Некорректные координаты",
                        "Invalid coordinates",
                    );
                }
                if let Some(leg) = &activity.transport {
                    if leg.price > MAX_PRICE_RUB {
                        reject(
                            format!("{}.transport.price", path),
                            "Недопустимая цена проезда",
                            "Transport fare out of bounds",
                        );
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            log::warn!(
                "Rejected rainy-day request for {}: {} field(s) out of bounds",
                itinerary.id,
                errors.len()
            );
            Err(PlannerError::Validation(errors))
        }
    }

    fn rebuild_day(
        &self,
        day: &DayPlan,
        relaxed_constraints: bool,
    ) -> Result<DayPlan, PlannerError> {
        let kept: Vec<Attraction> = day
            .activities
            .iter()
            .filter(|a| a.attraction.suits_rainy_day())
            .map(|a| a.attraction.clone())
            .collect();

        let mut rebuilt = self.packer.schedule_day(day.day, kept, day.meal_cost)?;

        // the day's leg from the city moves to whichever visit now comes first
        if let Some(first) = rebuilt.activities.first_mut() {
            first.transport = day.activities.iter().find_map(|a| a.transport.clone());
        }
        rebuilt.accommodation = day.accommodation.clone();
        rebuilt.rainy_alternatives = day.rainy_alternatives.clone();
        rebuilt.refresh_totals()?;
        rebuilt.notes = self.packer.day_notes(&rebuilt, relaxed_constraints);

        Ok(rebuilt)
    }
}
