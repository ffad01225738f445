//! Distance Service
//!
//! Great-circle distance between two coordinates and the travel time it
//! implies at an assumed average speed. The speed is an effective door to
//! door figure, so transfers and waiting are already folded in.

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLeg {
    pub distance_km: f64,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct DistanceService {
    average_speed_kmh: f64,
}

impl DistanceService {
    pub fn new(average_speed_kmh: f64) -> Self {
        Self { average_speed_kmh }
    }

    /// Haversine distance in kilometres between two `(lat, lng)` pairs.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let lat1_rad = from.0.to_radians();
        let lat2_rad = to.0.to_radians();
        let delta_lat = (to.0 - from.0).to_radians();
        let delta_lon = (to.1 - from.1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Minutes needed to cover `distance_km`, rounded to whole minutes.
    pub fn travel_minutes(&self, distance_km: f64) -> u32 {
        if self.average_speed_kmh <= 0.0 || distance_km <= 0.0 {
            return 0;
        }
        (distance_km / self.average_speed_kmh * 60.0).round() as u32
    }

    pub fn leg(&self, from: (f64, f64), to: (f64, f64)) -> TravelLeg {
        let distance_km = Self::haversine_km(from, to);
        TravelLeg {
            distance_km,
            duration_minutes: self.travel_minutes(distance_km),
        }
    }
}
