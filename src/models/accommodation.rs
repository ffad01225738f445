use serde::{Deserialize, Serialize};

use super::{GeoLocation, LocalizedText, TieredPrice};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationKind {
    Hotel,
    Guesthouse,
    Sanatorium,
    Pension,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AccommodationAccessibility {
    pub elevator: bool,
    pub wheelchair_accessible: bool,
    pub senior_friendly: bool,
    pub low_floor_rooms: bool,
    pub medical_support: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Accommodation {
    pub id: String,
    pub name: LocalizedText,
    pub kind: AccommodationKind,
    pub location: GeoLocation,
    pub accessibility: AccommodationAccessibility,
    pub price_per_night: TieredPrice,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub rating: f32,
}
