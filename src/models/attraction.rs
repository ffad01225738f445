use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GeoLocation, LocalizedText, TieredPrice};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Museum,
    Park,
    Church,
    Palace,
    Nature,
    Monument,
    Shopping,
    Religious,
    Cultural,
    Historical,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Museum,
        Category::Park,
        Category::Church,
        Category::Palace,
        Category::Nature,
        Category::Monument,
        Category::Shopping,
        Category::Religious,
        Category::Cultural,
        Category::Historical,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Museum => "museum",
            Category::Park => "park",
            Category::Church => "church",
            Category::Palace => "palace",
            Category::Nature => "nature",
            Category::Monument => "monument",
            Category::Shopping => "shopping",
            Category::Religious => "religious",
            Category::Cultural => "cultural",
            Category::Historical => "historical",
            Category::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StairsLevel {
    Low,
    Medium,
    High,
}

impl StairsLevel {
    /// One tier more permissive, saturating at `High`.
    pub fn relaxed(self) -> Self {
        match self {
            StairsLevel::Low => StairsLevel::Medium,
            StairsLevel::Medium | StairsLevel::High => StairsLevel::High,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WalkingDistance {
    Short,
    Medium,
    Long,
}

impl WalkingDistance {
    /// Rough on-site walking in kilometres for a visit of this tier.
    pub fn approx_km(self) -> f64 {
        match self {
            WalkingDistance::Short => 0.5,
            WalkingDistance::Medium => 1.0,
            WalkingDistance::Long => 1.5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AccessibilityInfo {
    pub wheelchair_accessible: bool,
    pub has_elevator: bool,
    pub stairs_level: StairsLevel,
    pub resting_areas: bool,
    pub accessible_toilets: bool,
    pub walking_distance: WalkingDistance,
    pub comfort_rating: u8,
}

impl AccessibilityInfo {
    /// 0-100 score, 20 points per accommodating feature.
    pub fn score(&self) -> u32 {
        [
            self.wheelchair_accessible,
            self.has_elevator,
            self.stairs_level == StairsLevel::Low,
            self.resting_areas,
            self.accessible_toilets,
        ]
        .iter()
        .filter(|flag| **flag)
        .count() as u32
            * 20
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Attraction {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub location: GeoLocation,
    pub category: Category,
    pub accessibility: AccessibilityInfo,
    pub visit_duration_minutes: u32,
    pub ticket_price: TieredPrice,
    #[serde(default)]
    pub opening_hours: BTreeMap<String, String>,
    pub weather_dependent: bool,
    pub rainy_day_suitable: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Attraction {
    pub fn coordinates(&self) -> (f64, f64) {
        self.location.coordinates()
    }

    /// Whether the visit still works in bad weather.
    pub fn suits_rainy_day(&self) -> bool {
        !self.weather_dependent || self.rainy_day_suitable
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
