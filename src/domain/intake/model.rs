use crate::domain::dish::Dish;
use crate::domain::shared::{Nutrients, Pagination};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Intake {
    pub id: i64,
    pub dish_id: i64,
    pub amount_g: f64,
    pub consumed_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Embedded by list and detail endpoints
    #[serde(default)]
    pub dish: Option<Dish>,
}

impl Intake {
    /// Nutrients actually consumed, if the dish is embedded.
    pub fn nutrients(&self) -> Option<Nutrients> {
        self.dish
            .as_ref()
            .map(|dish| dish.nutrients.for_grams(self.amount_g))
    }
}

/// Request to log a new intake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIntakeRequest {
    pub dish_id: i64,
    pub amount_g: f64,
    /// Server uses the current time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIntakeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IntakeFilter {
    pub pagination: Pagination,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub dish_id: Option<i64>,
}

impl IntakeFilter {
    /// Intakes of a single calendar day.
    pub fn for_day(day: NaiveDate) -> Self {
        Self::between(day, day)
    }

    /// Intakes from `start` to `end`, both inclusive.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }
}
