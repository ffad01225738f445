use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::models::itinerary::{checked_sum, BudgetBreakdown, DayPlan};

pub struct PricingService;

impl PricingService {
    /// Total senior entrance fees across all days
    pub fn calculate_entrance_fees(days: &[DayPlan]) -> Result<u32, PlannerError> {
        checked_sum(days.iter().map(|day| day.ticket_cost), "entrance fees")
    }

    /// Total senior fares of the transport legs attached to activities
    pub fn calculate_transport_cost(days: &[DayPlan]) -> Result<u32, PlannerError> {
        checked_sum(days.iter().map(|day| day.transport_cost), "transport cost")
    }

    /// Flat per-day meal estimates
    pub fn calculate_meal_cost(days: &[DayPlan]) -> Result<u32, PlannerError> {
        checked_sum(days.iter().map(|day| day.meal_cost), "meal cost")
    }

    /// Nightly price times nights, where nights is days minus one.
    /// Uses the booked accommodation when there is one, otherwise the flat estimate.
    pub fn calculate_lodging_cost(
        days: &[DayPlan],
        config: &PlannerConfig,
    ) -> Result<u32, PlannerError> {
        let nights = u32::try_from(days.len().saturating_sub(1))
            .map_err(|_| PlannerError::Internal("night count overflowed".into()))?;
        let nightly = days
            .iter()
            .find_map(|day| day.accommodation.as_ref())
            .map(|accommodation| accommodation.price_per_night.senior)
            .unwrap_or(config.accommodation_nightly_estimate);
        nightly
            .checked_mul(nights)
            .ok_or_else(|| PlannerError::Internal("lodging cost overflowed".into()))
    }

    /// Miscellaneous buffer, a whole-ruble percentage of the subtotal
    pub fn calculate_misc(subtotal: u32, percent: u32) -> Result<u32, PlannerError> {
        let scaled = u64::from(subtotal) * u64::from(percent);
        u32::try_from((scaled + 50) / 100)
            .map_err(|_| PlannerError::Internal("misc buffer overflowed".into()))
    }

    pub fn estimate(
        days: &[DayPlan],
        config: &PlannerConfig,
    ) -> Result<BudgetBreakdown, PlannerError> {
        let entrance_fees = Self::calculate_entrance_fees(days)?;
        let transport = Self::calculate_transport_cost(days)?;
        let meals = Self::calculate_meal_cost(days)?;
        let accommodation = Self::calculate_lodging_cost(days, config)?;

        let subtotal = checked_sum(
            [entrance_fees, transport, meals, accommodation],
            "budget subtotal",
        )?;
        let misc = Self::calculate_misc(subtotal, config.misc_percent)?;

        Ok(BudgetBreakdown {
            entrance_fees,
            transport,
            meals,
            accommodation,
            misc,
            total: checked_sum([subtotal, misc], "budget total")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::test_support::accommodation;

    fn day(number: u8, tickets: u32, transport: u32, meals: u32) -> DayPlan {
        let mut plan = DayPlan::new(number, Vec::new(), meals).unwrap();
        plan.ticket_cost = tickets;
        plan.transport_cost = transport;
        plan
    }

    #[test]
    fn test_misc_rounding() {
        assert_eq!(PricingService::calculate_misc(1000, 10).unwrap(), 100);
        assert_eq!(PricingService::calculate_misc(1005, 10).unwrap(), 101);
        assert_eq!(PricingService::calculate_misc(1004, 10).unwrap(), 100);
        assert_eq!(PricingService::calculate_misc(0, 10).unwrap(), 0);
    }

    #[test]
    fn test_single_day_has_no_lodging() {
        let config = PlannerConfig::default();
        let budget = PricingService::estimate(&[day(1, 500, 0, 800)], &config).unwrap();
        assert_eq!(budget.accommodation, 0);
        assert_eq!(budget.misc, 130);
        assert_eq!(budget.total, 1430);
    }

    #[test]
    fn test_flat_and_booked_lodging() {
        let config = PlannerConfig::default();
        let mut days = vec![day(1, 300, 200, 800), day(2, 400, 0, 800), day(3, 0, 0, 800)];
        assert_eq!(PricingService::calculate_lodging_cost(&days, &config).unwrap(), 6000);

        days[0].accommodation = Some(accommodation("hotel", 2500, true));
        days[1].accommodation = Some(accommodation("hotel", 2500, true));
        assert_eq!(PricingService::calculate_lodging_cost(&days, &config).unwrap(), 5000);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let config = PlannerConfig::default();
        let days = vec![day(1, 333, 117, 800), day(2, 451, 0, 800)];
        let budget = PricingService::estimate(&days, &config).unwrap();

        assert_eq!(budget.entrance_fees, 784);
        assert_eq!(budget.transport, 117);
        assert_eq!(budget.meals, 1600);
        assert_eq!(budget.accommodation, 3000);
        assert_eq!(
            budget.total,
            budget.entrance_fees
                + budget.transport
                + budget.meals
                + budget.accommodation
                + budget.misc
        );
    }

    #[test]
    fn test_overflow_is_an_internal_error() {
        let config = PlannerConfig::default();
        let days = vec![day(1, u32::MAX - 100, 0, 800), day(2, 0, 0, 800)];
        let err = PricingService::estimate(&days, &config).unwrap_err();
        assert!(matches!(err, PlannerError::Internal(_)));

        let mut pricey = vec![day(1, 0, 0, 0), day(2, 0, 0, 0), day(3, 0, 0, 0)];
        pricey[0].accommodation = Some(accommodation("palace-suite", u32::MAX / 2 + 1, true));
        assert!(PricingService::calculate_lodging_cost(&pricey, &config).is_err());
    }
}
