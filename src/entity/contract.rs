use crate::entity::EntityKind;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u32 = 24 * 60;
const MINUTES_PER_WEEK: u32 = 7 * MINUTES_PER_DAY;
const MINUTES_PER_MONTH: u32 = 31 * MINUTES_PER_DAY;
const MINUTES_PER_YEAR: u32 = 366 * MINUTES_PER_DAY;

/// Working-time limits that employees can be hired under.
///
/// Every limit is optional; an absent limit means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_minutes_per_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_minutes_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_minutes_per_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_minutes_per_year: Option<u32>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            maximum_minutes_per_day: None,
            maximum_minutes_per_week: None,
            maximum_minutes_per_month: None,
            maximum_minutes_per_year: None,
        }
    }

    pub fn with_daily_limit(mut self, minutes: u32) -> Self {
        self.maximum_minutes_per_day = Some(minutes);
        self
    }

    pub fn with_weekly_limit(mut self, minutes: u32) -> Self {
        self.maximum_minutes_per_week = Some(minutes);
        self
    }

    fn check_limit(field: &str, value: Option<u32>, ceiling: u32) -> Result<(), ValidationError> {
        match value {
            Some(0) => Err(ValidationError::invalid_field(
                Self::NAME,
                field,
                "must be greater than zero when set",
            )),
            Some(minutes) if minutes > ceiling => Err(ValidationError::invalid_field(
                Self::NAME,
                field,
                format!("{} exceeds the {} minutes available in the period", minutes, ceiling),
            )),
            _ => Ok(()),
        }
    }
}

impl EntityKind for Contract {
    const NAME: &'static str = "Contract";
    const PATH: &'static str = "contract";

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_name(Self::NAME));
        }
        Self::check_limit("maximumMinutesPerDay", self.maximum_minutes_per_day, MINUTES_PER_DAY)?;
        Self::check_limit("maximumMinutesPerWeek", self.maximum_minutes_per_week, MINUTES_PER_WEEK)?;
        Self::check_limit("maximumMinutesPerMonth", self.maximum_minutes_per_month, MINUTES_PER_MONTH)?;
        Self::check_limit("maximumMinutesPerYear", self.maximum_minutes_per_year, MINUTES_PER_YEAR)
    }
}
