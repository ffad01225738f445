//! Route Optimization Service
//!
//! Orders shuffled candidates so that attractions close to each other end up
//! next to each other, which keeps them on the same day once the packer
//! slices the list.

use crate::models::attraction::Attraction;
use crate::services::distance_service::DistanceService;

pub struct RouteOptimizationService {
    radius_km: f64,
}

impl RouteOptimizationService {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    /// Greedy clustering in input order: each unassigned attraction opens a
    /// group and pulls in every later unassigned attraction within the radius
    /// of it.
    pub fn proximity_groups(&self, attractions: Vec<Attraction>) -> Vec<Vec<Attraction>> {
        let mut assigned = vec![false; attractions.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..attractions.len() {
            if assigned[i] {
                continue;
            }
            assigned[i] = true;
            let anchor = attractions[i].coordinates();
            let mut group = vec![i];

            for j in (i + 1)..attractions.len() {
                if assigned[j] {
                    continue;
                }
                let distance = DistanceService::haversine_km(anchor, attractions[j].coordinates());
                if distance <= self.radius_km {
                    assigned[j] = true;
                    group.push(j);
                }
            }
            groups.push(group);
        }

        let mut slots: Vec<Option<Attraction>> = attractions.into_iter().map(Some).collect();
        groups
            .into_iter()
            .map(|group| group.into_iter().filter_map(|i| slots[i].take()).collect())
            .collect()
    }

    /// Groups flattened back into a single visiting order.
    pub fn order_by_proximity(&self, attractions: Vec<Attraction>) -> Vec<Attraction> {
        let groups = self.proximity_groups(attractions);
        log::debug!("Proximity grouping produced {} groups", groups.len());
        groups.into_iter().flatten().collect()
    }
}
