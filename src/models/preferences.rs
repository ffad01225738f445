use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::attraction::{Category, StairsLevel, WalkingDistance};
use crate::config::PlannerConfig;
use crate::error::{FieldError, PlannerError};

pub const MIN_BUDGET: u32 = 500;
pub const MAX_BUDGET: u32 = 50_000;
/// Share of the top of the budget range one entrance ticket may take.
pub const TICKET_SHARE_PERCENT: u32 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    #[default]
    Medium,
    High,
}

impl BudgetTier {
    /// Spending range assumed when the traveller gives only a tier.
    pub fn default_range(&self) -> BudgetRange {
        match self {
            BudgetTier::Low => BudgetRange { min: MIN_BUDGET, max: 3_000 },
            BudgetTier::Medium => BudgetRange { min: 3_000, max: 10_000 },
            BudgetTier::High => BudgetRange { min: 10_000, max: MAX_BUDGET },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

fn default_days() -> u8 {
    1
}

fn default_max_stairs() -> StairsLevel {
    StairsLevel::High
}

fn default_max_walking() -> WalkingDistance {
    WalkingDistance::Long
}

/// Preferences as submitted by the traveller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserPreferences {
    #[serde(default = "default_days")]
    pub days: u8,
    #[serde(default)]
    pub budget_tier: BudgetTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    #[serde(default = "default_max_stairs")]
    pub max_stairs: StairsLevel,
    #[serde(default = "default_max_walking")]
    pub max_walking_distance: WalkingDistance,
    #[serde(default)]
    pub wheelchair_required: bool,
    #[serde(default)]
    pub rest_areas_required: bool,
    #[serde(default)]
    pub weather_averse: bool,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Explicit seed for reproducible output. Absent means unseeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            days: default_days(),
            budget_tier: BudgetTier::default(),
            budget_range: None,
            max_stairs: default_max_stairs(),
            max_walking_distance: default_max_walking(),
            wheelchair_required: false,
            rest_areas_required: false,
            weather_averse: false,
            interests: Vec::new(),
            seed: None,
        }
    }
}

/// Validated, normalised preferences the planner works from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningCriteria {
    pub days: u8,
    pub budget_tier: BudgetTier,
    pub budget_range: BudgetRange,
    pub max_stairs: StairsLevel,
    pub max_walking_distance: WalkingDistance,
    pub wheelchair_required: bool,
    pub rest_areas_required: bool,
    pub weather_averse: bool,
    pub interests: BTreeSet<Category>,
    /// Most a single senior ticket may cost in the strict filter pass.
    pub max_ticket_price: u32,
}

impl UserPreferences {
    /// Check every field and collect all problems before rejecting.
    pub fn validate(&self, config: &PlannerConfig) -> Result<PlanningCriteria, PlannerError> {
        let mut errors = Vec::new();

        if self.days < 1 || self.days > config.max_days {
            errors.push(FieldError::new(
                "days",
                &format!("Количество дней должно быть от 1 до {}", config.max_days),
                &format!("Number of days must be between 1 and {}", config.max_days),
            ));
        }

        if let Some(range) = &self.budget_range {
            if range.min >= range.max {
                errors.push(FieldError::new(
                    "budget_range",
                    "Некорректный диапазон бюджета",
                    "Invalid budget range",
                ));
            } else if range.min < MIN_BUDGET || range.max > MAX_BUDGET {
                errors.push(FieldError::new(
                    "budget_range",
                    "Бюджет должен быть в пределах от 500 до 50 000 рублей",
                    "Budget must be between 500 and 50,000 rubles",
                ));
            }
        }

        let mut interests = BTreeSet::new();
        let mut unknown = Vec::new();
        for raw in &self.interests {
            match raw.parse::<Category>() {
                Ok(category) => {
                    interests.insert(category);
                }
                Err(_) => unknown.push(raw.as_str()),
            }
        }
        if !unknown.is_empty() {
            errors.push(FieldError::new(
                "interests",
                &format!("Некорректные интересы: {}", unknown.join(", ")),
                &format!("Unrecognized interests: {}", unknown.join(", ")),
            ));
        }

        if !errors.is_empty() {
            return Err(PlannerError::Validation(errors));
        }

        let budget_range = self
            .budget_range
            .unwrap_or_else(|| self.budget_tier.default_range());

        Ok(PlanningCriteria {
            days: self.days,
            budget_tier: self.budget_tier,
            budget_range,
            max_ticket_price: budget_range.max * TICKET_SHARE_PERCENT / 100,
            max_stairs: self.max_stairs,
            max_walking_distance: self.max_walking_distance,
            wheelchair_required: self.wheelchair_required,
            rest_areas_required: self.rest_areas_required,
            weather_averse: self.weather_averse,
            interests,
        })
    }
}
