use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user's own account and daily targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub daily_calorie_goal: Option<f64>,
    #[serde(default)]
    pub daily_protein_goal: Option<f64>,
    #[serde(default)]
    pub daily_carbohydrates_goal: Option<f64>,
    #[serde(default)]
    pub daily_fat_goal: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Calories still available today, if a goal is set.
    pub fn remaining_calories(&self, consumed: f64) -> Option<f64> {
        self.daily_calorie_goal.map(|goal| goal - consumed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_protein_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_carbohydrates_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_fat_goal: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
