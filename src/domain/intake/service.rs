use super::{CreateIntakeRequest, Intake, IntakeFilter, NutritionSummary, UpdateIntakeRequest};
use crate::domain::shared::Pagination;
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, RequestDescriptor};
use async_trait::async_trait;
use std::sync::Arc;

const INTAKES_PATH: &str = "/api/v1/intakes";

/// Page size `summarize` uses when the filter sets no limit
pub const SUMMARY_PAGE_SIZE: u32 = 100;

pub struct IntakeService {
    client: Arc<ApiClient>,
}

impl IntakeService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
pub trait IntakeServiceApi: Send + Sync {
    async fn list_intakes(&self, filter: &IntakeFilter) -> ApiResult<Vec<Intake>>;

    async fn get_intake(&self, intake_id: i64) -> ApiResult<Intake>;

    async fn create_intake(&self, request: &CreateIntakeRequest) -> ApiResult<Intake>;

    async fn update_intake(
        &self,
        intake_id: i64,
        request: &UpdateIntakeRequest,
    ) -> ApiResult<Intake>;

    async fn delete_intake(&self, intake_id: i64) -> ApiResult<()>;

    /// Dashboard numbers for every intake matching `filter`, fetched page by page.
    ///
    /// `filter.pagination.limit` is the page size; its `skip` is ignored. Paging
    /// stops at the first page that is not exactly `limit` long.
    async fn summarize(&self, filter: &IntakeFilter) -> ApiResult<NutritionSummary> {
        let limit = filter.pagination.limit.unwrap_or(SUMMARY_PAGE_SIZE).max(1);
        let mut page_filter = filter.clone();
        let mut intakes = Vec::new();
        let mut skip = 0u32;

        loop {
            page_filter.pagination = Pagination::new(skip, limit);
            let page = self.list_intakes(&page_filter).await?;
            let fetched = page.len();
            intakes.extend(page);

            if fetched != limit as usize {
                break;
            }
            skip = match skip.checked_add(limit) {
                Some(next) => next,
                None => break,
            };
        }

        tracing::debug!(intakes = intakes.len(), "Summarizing intakes");
        Ok(NutritionSummary::from_intakes(&intakes))
    }
}

#[async_trait]
impl IntakeServiceApi for IntakeService {
    async fn list_intakes(&self, filter: &IntakeFilter) -> ApiResult<Vec<Intake>> {
        let request = filter
            .pagination
            .apply(RequestDescriptor::get(INTAKES_PATH))
            .with_optional_query("start_date", filter.start_date)
            .with_optional_query("end_date", filter.end_date)
            .with_optional_query("dish_id", filter.dish_id);
        self.client.fetch_json(&request).await
    }

    async fn get_intake(&self, intake_id: i64) -> ApiResult<Intake> {
        self.client
            .fetch_json(&RequestDescriptor::get(intake_path(intake_id)))
            .await
    }

    async fn create_intake(&self, request: &CreateIntakeRequest) -> ApiResult<Intake> {
        let request = RequestDescriptor::post(INTAKES_PATH).with_json(request)?;
        let intake: Intake = self.client.fetch_json(&request).await?;
        tracing::debug!(intake_id = intake.id, dish_id = intake.dish_id, "Intake logged");
        Ok(intake)
    }

    async fn update_intake(
        &self,
        intake_id: i64,
        request: &UpdateIntakeRequest,
    ) -> ApiResult<Intake> {
        let request = RequestDescriptor::put(intake_path(intake_id)).with_json(request)?;
        self.client.fetch_json(&request).await
    }

    async fn delete_intake(&self, intake_id: i64) -> ApiResult<()> {
        self.client
            .send(&RequestDescriptor::delete(intake_path(intake_id)))
            .await
    }
}

fn intake_path(intake_id: i64) -> String {
    format!("{}/{}", INTAKES_PATH, intake_id)
}
