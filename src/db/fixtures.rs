use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::PlannerError;
use crate::models::{
    accommodation::Accommodation, attraction::Attraction, transport::TransportOption,
};

const EMBEDDED_ATTRACTIONS: &str = include_str!("../../data/attractions.json");
const EMBEDDED_ACCOMMODATIONS: &str = include_str!("../../data/accommodations.json");
const EMBEDDED_TRANSPORT: &str = include_str!("../../data/transport.json");

/// Read-only reference tables, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    attractions: Vec<Attraction>,
    accommodations: Vec<Accommodation>,
    transport: Vec<TransportOption>,
}

impl FixtureStore {
    pub fn new(
        attractions: Vec<Attraction>,
        accommodations: Vec<Accommodation>,
        transport: Vec<TransportOption>,
    ) -> Result<Self, PlannerError> {
        let store = Self {
            attractions,
            accommodations,
            transport,
        };
        store.validate()?;
        Ok(store)
    }

    pub fn from_json(
        attractions: &str,
        accommodations: &str,
        transport: &str,
    ) -> Result<Self, PlannerError> {
        Self::new(
            serde_json::from_str(attractions)?,
            serde_json::from_str(accommodations)?,
            serde_json::from_str(transport)?,
        )
    }

    /// The data set compiled into the binary.
    pub fn embedded() -> Result<Self, PlannerError> {
        Self::from_json(
            EMBEDDED_ATTRACTIONS,
            EMBEDDED_ACCOMMODATIONS,
            EMBEDDED_TRANSPORT,
        )
    }

    /// Load `attractions.json`, `accommodations.json` and `transport.json` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, PlannerError> {
        let read = |name: &str| std::fs::read_to_string(dir.join(name));
        Self::from_json(
            &read("attractions.json")?,
            &read("accommodations.json")?,
            &read("transport.json")?,
        )
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn accommodations(&self) -> &[Accommodation] {
        &self.accommodations
    }

    pub fn transport(&self) -> &[TransportOption] {
        &self.transport
    }

    pub fn attraction(&self, id: &str) -> Option<&Attraction> {
        self.attractions.iter().find(|a| a.id == id)
    }

    fn validate(&self) -> Result<(), PlannerError> {
        let mut seen = HashSet::new();
        for attraction in &self.attractions {
            if !seen.insert(attraction.id.as_str()) {
                return Err(PlannerError::Fixture(format!(
                    "duplicate attraction id '{}'",
                    attraction.id
                )));
            }
            let rating = attraction.accessibility.comfort_rating;
            if !(1..=5).contains(&rating) {
                return Err(PlannerError::Fixture(format!(
                    "attraction '{}' has comfort rating {} outside 1-5",
                    attraction.id, rating
                )));
            }
            if attraction.visit_duration_minutes == 0 {
                return Err(PlannerError::Fixture(format!(
                    "attraction '{}' has no visit duration",
                    attraction.id
                )));
            }
            let (lat, lng) = attraction.coordinates();
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                return Err(PlannerError::Fixture(format!(
                    "attraction '{}' has invalid coordinates ({}, {})",
                    attraction.id, lat, lng
                )));
            }
        }

        let mut seen = HashSet::new();
        for accommodation in &self.accommodations {
            if !seen.insert(accommodation.id.as_str()) {
                return Err(PlannerError::Fixture(format!(
                    "duplicate accommodation id '{}'",
                    accommodation.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for option in &self.transport {
            if !seen.insert(option.id.as_str()) {
                return Err(PlannerError::Fixture(format!(
                    "duplicate transport id '{}'",
                    option.id
                )));
            }
        }

        Ok(())
    }
}

pub fn create_fixture_store(dir: Option<&Path>) -> Result<Arc<FixtureStore>, PlannerError> {
    let store = match dir {
        Some(dir) => {
            log::info!("Loading fixture data from {}", dir.display());
            FixtureStore::from_dir(dir)?
        }
        None => {
            log::info!("Loading embedded fixture data");
            FixtureStore::embedded()?
        }
    };

    log::info!(
        "Fixture data loaded: {} attractions, {} accommodations, {} transport options",
        store.attractions().len(),
        store.accommodations().len(),
        store.transport().len()
    );

    Ok(Arc::new(store))
}
