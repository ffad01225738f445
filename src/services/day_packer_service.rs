use std::ops::Range;

use chrono::{Duration, NaiveTime};

use crate::config::{PartitionStrategy, PlannerConfig};
use crate::error::PlannerError;
use crate::models::attraction::{Attraction, StairsLevel};
use crate::models::itinerary::{DayPlan, ScheduledActivity};
use crate::models::LocalizedText;
use crate::services::distance_service::DistanceService;

const LONG_DAY_VISIT_MINUTES: u32 = 360;
const HEAVY_TRAVEL_PERCENT: u32 = 30;
const FRONT_LOADED_FIRST_DAY: usize = 3;
const FRONT_LOADED_LATER_DAYS: usize = 2;

pub struct DayPacker {
    day_ceiling_minutes: u32,
    day_start: NaiveTime,
    visit_buffer_minutes: u32,
    partition: PartitionStrategy,
    distance: DistanceService,
}

impl DayPacker {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            day_ceiling_minutes: config.day_ceiling_minutes,
            day_start: config.day_start,
            visit_buffer_minutes: config.visit_buffer_minutes,
            partition: config.partition,
            distance: DistanceService::new(config.average_speed_kmh),
        }
    }

    /// Split `count` ordered candidates into exactly `days` index ranges.
    /// Even slices differ by at most one item, extras going to the earliest
    /// days. Trailing ranges may be empty.
    pub fn partition(&self, count: usize, days: usize) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(days);
        let mut start = 0;
        let (base, extra) = match days {
            0 => (0, 0),
            _ => (count / days, count % days),
        };

        for day in 0..days {
            let size = match self.partition {
                PartitionStrategy::Even => base + usize::from(day < extra),
                PartitionStrategy::FrontLoaded if day == 0 => FRONT_LOADED_FIRST_DAY,
                PartitionStrategy::FrontLoaded => FRONT_LOADED_LATER_DAYS,
            };
            let end = (start + size).min(count);
            ranges.push(start..end);
            start = end;
        }

        ranges
    }

    /// Longest prefix of `candidates` whose visit time plus travel between
    /// consecutive stops stays within the day ceiling.
    pub fn fit_day(&self, candidates: &[Attraction]) -> Vec<Attraction> {
        let mut fitted: Vec<Attraction> = Vec::new();
        let mut used_minutes: u32 = 0;

        for candidate in candidates {
            let travel = fitted
                .last()
                .map(|prev| {
                    self.distance
                        .leg(prev.coordinates(), candidate.coordinates())
                        .duration_minutes
                })
                .unwrap_or(0);

            let needed = used_minutes
                .saturating_add(travel)
                .saturating_add(candidate.visit_duration_minutes);
            if needed > self.day_ceiling_minutes {
                log::debug!(
                    "'{}' does not fit ({} of {} minutes), closing the day",
                    candidate.id,
                    needed,
                    self.day_ceiling_minutes
                );
                break;
            }

            used_minutes = needed;
            fitted.push(candidate.clone());
        }

        fitted
    }

    /// Assign clock times: the first visit starts at day start, each later
    /// one after the buffer plus travel from the previous stop.
    pub fn schedule_day(
        &self,
        day: u8,
        attractions: Vec<Attraction>,
        meal_cost: u32,
    ) -> Result<DayPlan, PlannerError> {
        let mut activities: Vec<ScheduledActivity> = Vec::with_capacity(attractions.len());
        let mut previous: Option<((f64, f64), NaiveTime)> = None;

        for attraction in attractions {
            let coords = attraction.coordinates();
            let (start_time, travel_minutes, travel_km) = match previous {
                None => (self.day_start, 0, 0.0),
                Some((prev_coords, prev_end)) => {
                    let leg = self.distance.leg(prev_coords, coords);
                    let gap =
                        i64::from(self.visit_buffer_minutes) + i64::from(leg.duration_minutes);
                    (prev_end + Duration::minutes(gap), leg.duration_minutes, leg.distance_km)
                }
            };
            let end_time =
                start_time + Duration::minutes(i64::from(attraction.visit_duration_minutes));

            previous = Some((coords, end_time));
            activities.push(ScheduledActivity {
                notes: activity_note(&attraction),
                attraction,
                start_time,
                end_time,
                travel_minutes_from_previous: travel_minutes,
                travel_km_from_previous: (travel_km * 10.0).round() / 10.0,
                transport: None,
            });
        }

        DayPlan::new(day, activities, meal_cost)
    }

    /// Pack ordered candidates into exactly `days` day plans.
    pub fn pack(
        &self,
        candidates: &[Attraction],
        days: u8,
        meal_cost: u32,
    ) -> Result<Vec<DayPlan>, PlannerError> {
        self.partition(candidates.len(), usize::from(days))
            .into_iter()
            .zip(1..=days)
            .map(|(range, day)| {
                let fitted = self.fit_day(&candidates[range]);
                self.schedule_day(day, fitted, meal_cost)
            })
            .collect()
    }

    /// Bilingual remarks derived from a finished day plan.
    pub fn day_notes(&self, plan: &DayPlan, relaxed_constraints: bool) -> Vec<LocalizedText> {
        let mut notes = Vec::new();

        if relaxed_constraints && plan.day == 1 {
            notes.push(LocalizedText::new(
                "Подходящих мест было мало, поэтому требования к лестницам, интересам и цене билетов были смягчены",
                "Few places matched, so stair, interest and ticket price limits were relaxed",
            ));
        }

        if plan.is_empty() {
            notes.push(LocalizedText::new(
                format!(
                    "На этот день не удалось подобрать места, укладывающиеся в {} часов",
                    self.day_ceiling_minutes / 60
                ),
                format!(
                    "No suitable attraction fits into a {}-hour day; consider a free day or rest",
                    self.day_ceiling_minutes / 60
                ),
            ));
            return notes;
        }

        if plan.visit_minutes > LONG_DAY_VISIT_MINUTES {
            notes.push(LocalizedText::new(
                "Насыщенный день: запланируйте перерывы на отдых",
                "Busy day: plan rest breaks between visits",
            ));
        }

        if u64::from(plan.travel_minutes) * 100
            > u64::from(plan.visit_minutes) * u64::from(HEAVY_TRAVEL_PERCENT)
        {
            notes.push(LocalizedText::new(
                "Много времени в дороге между объектами",
                "A large share of the day is spent travelling",
            ));
        }

        if plan
            .activities
            .iter()
            .all(|a| a.attraction.accessibility.wheelchair_accessible)
        {
            notes.push(LocalizedText::new(
                "Все места дня доступны для инвалидных колясок",
                "Every stop today is wheelchair accessible",
            ));
        }

        notes
    }
}

fn activity_note(attraction: &Attraction) -> LocalizedText {
    let access = &attraction.accessibility;
    if access.stairs_level == StairsLevel::High {
        LocalizedText::new(
            "Много лестниц, двигайтесь в своём темпе",
            "Many stairs, take your time",
        )
    } else if attraction.weather_dependent && !attraction.rainy_day_suitable {
        LocalizedText::new(
            "Прогулка на открытом воздухе, проверьте прогноз погоды",
            "Outdoor visit, check the weather forecast",
        )
    } else if access.resting_areas {
        LocalizedText::new("Есть места для отдыха", "Resting areas available")
    } else {
        LocalizedText::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::test_support::attraction;

    fn packer() -> DayPacker {
        DayPacker::new(&PlannerConfig::default())
    }

    fn at(id: &str, minutes: u32, lat: f64, lng: f64) -> Attraction {
        let mut a = attraction(id, minutes, 100);
        a.location.lat = lat;
        a.location.lng = lng;
        a
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_even_partition() {
        assert_eq!(packer().partition(7, 3), vec![0..3, 3..5, 5..7]);
        assert_eq!(packer().partition(4, 3), vec![0..2, 2..3, 3..4]);
        assert_eq!(packer().partition(6, 3), vec![0..2, 2..4, 4..6]);
        assert_eq!(packer().partition(2, 3), vec![0..1, 1..2, 2..2]);
        assert_eq!(packer().partition(0, 2), vec![0..0, 0..0]);
    }

    #[test]
    fn test_front_loaded_partition() {
        let config = PlannerConfig {
            partition: PartitionStrategy::FrontLoaded,
            ..Default::default()
        };
        let packer = DayPacker::new(&config);
        assert_eq!(packer.partition(10, 3), vec![0..3, 3..5, 5..7]);
        assert_eq!(packer.partition(4, 3), vec![0..3, 3..4, 4..4]);
    }

    #[test]
    fn test_fit_day_stops_at_first_overflow() {
        // same spot, so no travel
        let items = vec![
            at("a", 200, 59.9, 30.3),
            at("b", 200, 59.9, 30.3),
            at("c", 100, 59.9, 30.3),
            at("d", 60, 59.9, 30.3),
        ];
        let fitted = packer().fit_day(&items);
        let ids: Vec<&str> = fitted.iter().map(|a| a.id.as_str()).collect();
        // 400 + 100 > 480 stops at "c", "d" is never considered
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_fit_day_counts_travel() {
        // ~24.5 km apart, 59 minutes at 25 km/h
        let items = vec![at("spb", 240, 59.9343, 30.3351), at("pushkin", 200, 59.7160, 30.3957)];
        assert_eq!(packer().fit_day(&items).len(), 1);
    }

    #[test]
    fn test_oversized_first_item_gives_empty_day() {
        let plans = packer().pack(&[at("huge", 500, 59.9, 30.3)], 1, 800).unwrap();
        assert_eq!(plans.len(), 1);
        assert!(plans[0].is_empty());
        assert_eq!(plans[0].total_cost, 800);
        let notes = packer().day_notes(&plans[0], false);
        assert_eq!(notes.len(), 1);
        assert!(!notes[0].en.is_empty());
    }

    #[test]
    fn test_schedule_times() {
        let items = vec![at("a", 90, 59.9343, 30.3351), at("b", 60, 59.7160, 30.3957)];
        let plan = packer().schedule_day(1, items, 800).unwrap();

        let first = &plan.activities[0];
        assert_eq!(first.start_time, time(10, 0));
        assert_eq!(first.end_time, time(11, 30));
        assert_eq!(first.travel_minutes_from_previous, 0);

        let second = &plan.activities[1];
        let travel = second.travel_minutes_from_previous;
        assert!(travel > 50 && travel < 65, "travel {}", travel);
        assert_eq!(
            second.start_time,
            time(11, 30) + Duration::minutes(30 + i64::from(travel))
        );
        assert_eq!(plan.visit_minutes, 150);
        assert_eq!(plan.total_duration_minutes, 150 + travel);
        assert_eq!(plan.ticket_cost, 200);
        assert_eq!(plan.total_cost, 200 + 800);
    }

    #[test]
    fn test_always_produces_requested_days() {
        let items = vec![at("a", 60, 59.9, 30.3)];
        let plans = packer().pack(&items, 3, 400).unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans.iter().map(|p| p.day).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(plans[0].activities.len(), 1);
        assert!(plans[1].is_empty() && plans[2].is_empty());
    }

    #[test]
    fn test_day_notes() {
        let items = vec![
            at("a", 200, 59.9343, 30.3351),
            at("b", 200, 59.9343, 30.3351),
        ];
        let plan = packer().schedule_day(1, items, 800).unwrap();
        let notes = packer().day_notes(&plan, true);
        let english: Vec<&str> = notes.iter().map(|n| n.en.as_str()).collect();
        assert_eq!(
            english,
            vec![
                "Few places matched, so stair, interest and ticket price limits were relaxed",
                "Busy day: plan rest breaks between visits",
                "Every stop today is wheelchair accessible",
            ]
        );
    }

    #[test]
    fn test_heavy_travel_note() {
        let items = vec![at("spb", 60, 59.9343, 30.3351), at("pushkin", 60, 59.7160, 30.3957)];
        let plan = packer().schedule_day(2, items, 800).unwrap();
        let notes = packer().day_notes(&plan, true);
        assert!(notes
            .iter()
            .any(|n| n.en == "A large share of the day is spent travelling"));
        assert!(!notes.iter().any(|n| n.en.contains("relaxed")));
    }
}
