pub mod model;
pub mod service;
pub mod summary;

pub use model::{CreateIntakeRequest, Intake, IntakeFilter, UpdateIntakeRequest};
pub use service::{IntakeService, IntakeServiceApi};
pub use summary::{DailyNutrition, NutritionSummary};
