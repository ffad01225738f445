pub mod accommodation;
pub mod attraction;
pub mod itinerary;
pub mod preferences;
pub mod transport;

use serde::{Deserialize, Serialize};

/// Text carried in both supported languages.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct LocalizedText {
    pub ru: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(ru: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ru: ru.into(),
            en: en.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeoLocation {
    pub city: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<LocalizedText>,
    pub lat: f64,
    pub lng: f64,
}

impl GeoLocation {
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Price pair used by every fixture table: full fare and the senior discount.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct TieredPrice {
    pub standard: u32,
    pub senior: u32,
}
