use super::Intake;
use crate::domain::shared::Nutrients;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one calendar day (UTC).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub totals: Nutrients,
    pub intake_count: usize,
}

/// Aggregated nutrition over a set of intakes, as shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NutritionSummary {
    /// Ordered by date
    pub days: Vec<DailyNutrition>,
    pub totals: Nutrients,
    /// Intakes whose dish was not embedded and so contribute no nutrients
    pub incomplete_intakes: usize,
}

impl NutritionSummary {
    pub fn from_intakes(intakes: &[Intake]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, (Nutrients, usize)> = BTreeMap::new();
        let mut incomplete_intakes = 0;

        for intake in intakes {
            let entry = by_day
                .entry(intake.consumed_at.date_naive())
                .or_insert((Nutrients::default(), 0));
            entry.1 += 1;

            match intake.nutrients() {
                Some(nutrients) => entry.0 += nutrients,
                None => incomplete_intakes += 1,
            }
        }

        let days: Vec<DailyNutrition> = by_day
            .into_iter()
            .map(|(date, (totals, intake_count))| DailyNutrition {
                date,
                totals,
                intake_count,
            })
            .collect();
        let totals = days.iter().map(|day| day.totals).sum();

        Self {
            days,
            totals,
            incomplete_intakes,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyNutrition> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Mean daily calories over the days that have intakes.
    pub fn average_daily_calories(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.totals.calories / self.days.len() as f64
    }
}
