use serde::{Deserialize, Serialize};

use super::{LocalizedText, TieredPrice};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Taxi,
    Minibus,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Route {
    pub from: LocalizedText,
    pub to: LocalizedText,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportAccessibility {
    pub low_floor: bool,
    pub wheelchair_accessible: bool,
    pub comfort_seats: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TransportSchedule {
    #[serde(default)]
    pub weekday: Vec<String>,
    #[serde(default)]
    pub weekend: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportOption {
    pub id: String,
    pub mode: TransportMode,
    pub route: Route,
    pub duration_minutes: u32,
    pub price: TieredPrice,
    pub accessibility: TransportAccessibility,
    pub frequency: LocalizedText,
    #[serde(default)]
    pub schedule: TransportSchedule,
}

impl TransportOption {
    /// True when the route ends in the given city (English name, case-insensitive).
    pub fn serves_city(&self, city_en: &str) -> bool {
        self.route.to.en.trim().eq_ignore_ascii_case(city_en.trim())
    }
}
