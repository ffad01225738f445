use crate::error::PlannerError;
use crate::models::attraction::{Attraction, StairsLevel};
use crate::models::preferences::PlanningCriteria;

/// Candidates that survived filtering, in fixture order.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub candidates: Vec<Attraction>,
    /// Set when the strict pass came up short and a looser pass widened the pool.
    pub relaxed: bool,
}

pub struct PreferenceFilter;

impl PreferenceFilter {
    /// Strict pass first; if it leaves fewer than two candidates per day, retry
    /// with stairs relaxed one tier, interests ignored and no ticket cap.
    pub fn apply(
        attractions: &[Attraction],
        criteria: &PlanningCriteria,
    ) -> Result<FilterOutcome, PlannerError> {
        let strict: Vec<Attraction> = attractions
            .iter()
            .filter(|a| Self::matches(a, criteria, criteria.max_stairs, true))
            .cloned()
            .collect();

        let wanted = usize::from(criteria.days) * 2;
        if strict.len() >= wanted {
            return Ok(FilterOutcome {
                candidates: strict,
                relaxed: false,
            });
        }

        let relaxed_stairs = criteria.max_stairs.relaxed();
        let relaxed: Vec<Attraction> = attractions
            .iter()
            .filter(|a| Self::matches(a, criteria, relaxed_stairs, false))
            .cloned()
            .collect();

        log::debug!(
            "Strict filter kept {} of {} attractions (wanted {}), relaxed pass kept {}",
            strict.len(),
            attractions.len(),
            wanted,
            relaxed.len()
        );

        if relaxed.is_empty() {
            return Err(PlannerError::NoCandidates);
        }

        let widened = relaxed.len() > strict.len();
        Ok(FilterOutcome {
            candidates: relaxed,
            relaxed: widened,
        })
    }

    /// Whether one attraction satisfies the hard accessibility constraints and,
    /// in the strict pass, the ticket cap and the interest filter.
    pub fn matches(
        attraction: &Attraction,
        criteria: &PlanningCriteria,
        max_stairs: StairsLevel,
        strict: bool,
    ) -> bool {
        let access = &attraction.accessibility;

        if criteria.wheelchair_required && !access.wheelchair_accessible {
            return false;
        }
        if criteria.rest_areas_required && !access.resting_areas {
            return false;
        }
        if access.stairs_level > max_stairs {
            return false;
        }
        if access.walking_distance > criteria.max_walking_distance {
            return false;
        }
        if criteria.weather_averse && attraction.weather_dependent {
            return false;
        }

        if !strict {
            return true;
        }
        if attraction.ticket_price.senior > criteria.max_ticket_price {
            return false;
        }
        if !criteria.interests.is_empty() {
            return criteria.interests.iter().any(|interest| {
                attraction.category == *interest || attraction.has_tag(interest.as_str())
            });
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::db::fixtures::test_support::attraction;
    use crate::models::attraction::{Category, WalkingDistance};
    use crate::models::preferences::{BudgetTier, UserPreferences};

    fn criteria(prefs: UserPreferences) -> PlanningCriteria {
        prefs.validate(&PlannerConfig::default()).unwrap()
    }

    fn ids(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.candidates.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_hard_constraints() {
        let mut no_wheelchair = attraction("no-wheelchair", 60, 100);
        no_wheelchair.accessibility.wheelchair_accessible = false;
        let mut no_rest = attraction("no-rest", 60, 100);
        no_rest.accessibility.resting_areas = false;
        let mut long_walk = attraction("long-walk", 60, 100);
        long_walk.accessibility.walking_distance = WalkingDistance::Long;
        let mut outdoor = attraction("outdoor", 60, 100);
        outdoor.weather_dependent = true;

        let c = criteria(UserPreferences {
            wheelchair_required: true,
            rest_areas_required: true,
            weather_averse: true,
            max_walking_distance: WalkingDistance::Medium,
            ..Default::default()
        });

        assert!(PreferenceFilter::matches(&attraction("ok", 60, 100), &c, c.max_stairs, true));
        for rejected in [&no_wheelchair, &no_rest, &long_walk, &outdoor] {
            assert!(
                !PreferenceFilter::matches(rejected, &c, c.max_stairs, true),
                "{} should be rejected",
                rejected.id
            );
        }
    }

    #[test]
    fn test_interest_matches_category_or_tag() {
        let museum = attraction("museum", 60, 100);
        let mut tagged = attraction("tagged", 60, 100);
        tagged.category = Category::Palace;
        tagged.tags = vec!["Park".into()];
        let mut other = attraction("other", 60, 100);
        other.category = Category::Shopping;

        let c = criteria(UserPreferences {
            interests: vec!["museum".into(), "park".into()],
            ..Default::default()
        });

        assert!(PreferenceFilter::matches(&museum, &c, c.max_stairs, true));
        assert!(PreferenceFilter::matches(&tagged, &c, c.max_stairs, true));
        assert!(!PreferenceFilter::matches(&other, &c, c.max_stairs, true));
        assert!(PreferenceFilter::matches(&other, &c, c.max_stairs, false));
    }

    #[test]
    fn test_strict_pass_used_when_enough() {
        let pool: Vec<Attraction> = (0..4).map(|i| attraction(&format!("a{}", i), 60, 100)).collect();
        let c = criteria(UserPreferences {
            days: 2,
            ..Default::default()
        });
        let outcome = PreferenceFilter::apply(&pool, &c).unwrap();
        assert!(!outcome.relaxed);
        assert_eq!(ids(&outcome), vec!["a0", "a1", "a2", "a3"]);
    }

    #[test]
    fn test_relaxed_pass_drops_interests_and_loosens_stairs() {
        let museum = attraction("museum", 60, 100);
        let mut park = attraction("park", 60, 100);
        park.category = Category::Park;
        park.accessibility.stairs_level = StairsLevel::Medium;
        let mut steep = attraction("steep", 60, 100);
        steep.accessibility.stairs_level = StairsLevel::High;
        let mut inaccessible = attraction("inaccessible", 60, 100);
        inaccessible.accessibility.wheelchair_accessible = false;

        let c = criteria(UserPreferences {
            days: 2,
            max_stairs: StairsLevel::Low,
            wheelchair_required: true,
            interests: vec!["museum".into()],
            ..Default::default()
        });

        let outcome =
            PreferenceFilter::apply(&[museum, park, steep, inaccessible], &c).unwrap();
        assert!(outcome.relaxed);
        assert_eq!(ids(&outcome), vec!["museum", "park"]);
    }

    #[test]
    fn test_relaxed_flag_only_when_pool_grows() {
        let c = criteria(UserPreferences::default());
        let outcome = PreferenceFilter::apply(&[attraction("only", 90, 100)], &c).unwrap();
        assert!(!outcome.relaxed);
        assert_eq!(ids(&outcome), vec!["only"]);
    }

    #[test]
    fn test_no_candidates() {
        let mut inaccessible = attraction("inaccessible", 60, 100);
        inaccessible.accessibility.wheelchair_accessible = false;
        let c = criteria(UserPreferences {
            wheelchair_required: true,
            ..Default::default()
        });
        let err = PreferenceFilter::apply(&[inaccessible], &c).unwrap_err();
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_ticket_cap_in_strict_pass_only() {
        let c = criteria(UserPreferences {
            budget_tier: BudgetTier::Low,
            ..Default::default()
        });
        let cheap = attraction("cheap", 60, 300);
        let pricey = attraction("pricey", 60, 400);

        assert!(PreferenceFilter::matches(&cheap, &c, c.max_stairs, true));
        assert!(!PreferenceFilter::matches(&pricey, &c, c.max_stairs, true));
        assert!(PreferenceFilter::matches(&pricey, &c, c.max_stairs, false));

        let pool: Vec<Attraction> = (0..2)
            .map(|i| attraction(&format!("cheap{}", i), 60, 100))
            .chain((0..2).map(|i| attraction(&format!("pricey{}", i), 60, 2_000)))
            .collect();
        let strict = PreferenceFilter::apply(&pool, &c).unwrap();
        assert!(!strict.relaxed);
        assert_eq!(ids(&strict), vec!["cheap0", "cheap1"]);

        let two_days = criteria(UserPreferences {
            days: 2,
            budget_tier: BudgetTier::Low,
            ..Default::default()
        });
        let relaxed = PreferenceFilter::apply(&pool, &two_days).unwrap();
        assert!(relaxed.relaxed);
        assert_eq!(relaxed.candidates.len(), 4);
    }
}
