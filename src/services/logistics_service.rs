use crate::models::accommodation::Accommodation;
use crate::models::attraction::Attraction;
use crate::models::itinerary::TransportLeg;
use crate::models::preferences::PlanningCriteria;
use crate::models::transport::TransportOption;
use crate::services::sequencer::SeededRandom;

/// Share of the budget maximum a night may cost, tried in order.
const NIGHTLY_BUDGET_SHARES: [u32; 2] = [40, 60];

pub struct LogisticsService;

impl LogisticsService {
    /// One place to stay for the whole trip, or none for day trips.
    pub fn select_accommodation(
        accommodations: &[Accommodation],
        criteria: &PlanningCriteria,
        rng: &mut SeededRandom,
    ) -> Option<Accommodation> {
        if criteria.days <= 1 {
            return None;
        }

        let suitable: Vec<&Accommodation> = accommodations
            .iter()
            .filter(|a| !criteria.wheelchair_required || a.accessibility.wheelchair_accessible)
            .collect();

        for share in NIGHTLY_BUDGET_SHARES {
            let cap = u64::from(criteria.budget_range.max) * u64::from(share) / 100;
            let affordable: Vec<&Accommodation> = suitable
                .iter()
                .copied()
                .filter(|a| u64::from(a.price_per_night.senior) <= cap)
                .collect();

            if let Some(choice) = rng.choose(&affordable) {
                log::debug!("Selected accommodation '{}' under {}% cap", choice.id, share);
                return Some((*choice).clone());
            }
        }

        log::debug!("No accommodation within budget, using the flat nightly estimate");
        None
    }

    /// First transport option that ends in the attraction's city.
    pub fn transport_leg_for(
        attraction: &Attraction,
        options: &[TransportOption],
        wheelchair_required: bool,
    ) -> Option<TransportLeg> {
        options
            .iter()
            .filter(|option| !wheelchair_required || option.accessibility.wheelchair_accessible)
            .find(|option| option.serves_city(&attraction.location.city.en))
            .map(|option| TransportLeg {
                transport_id: option.id.clone(),
                mode: option.mode,
                from: option.route.from.clone(),
                to: option.route.to.clone(),
                duration_minutes: option.duration_minutes,
                price: option.price.senior,
            })
    }
}
