use super::{CreateDishRequest, Dish, DishFilter, UpdateDishRequest};
use crate::error::ApiResult;
use crate::infrastructure::http::{ApiClient, RequestDescriptor};
use async_trait::async_trait;
use std::sync::Arc;

const DISHES_PATH: &str = "/api/v1/dishes";

pub struct DishService {
    client: Arc<ApiClient>,
}

impl DishService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
pub trait DishServiceApi: Send + Sync {
    async fn list_dishes(&self, filter: &DishFilter) -> ApiResult<Vec<Dish>>;

    async fn get_dish(&self, dish_id: i64) -> ApiResult<Dish>;

    async fn create_dish(&self, request: &CreateDishRequest) -> ApiResult<Dish>;

    async fn update_dish(&self, dish_id: i64, request: &UpdateDishRequest) -> ApiResult<Dish>;

    async fn delete_dish(&self, dish_id: i64) -> ApiResult<()>;
}

#[async_trait]
impl DishServiceApi for DishService {
    async fn list_dishes(&self, filter: &DishFilter) -> ApiResult<Vec<Dish>> {
        let request = filter
            .pagination
            .apply(RequestDescriptor::get(DISHES_PATH))
            .with_optional_query("search", filter.search.as_deref());
        self.client.fetch_json(&request).await
    }

    async fn get_dish(&self, dish_id: i64) -> ApiResult<Dish> {
        self.client
            .fetch_json(&RequestDescriptor::get(dish_path(dish_id)))
            .await
    }

    async fn create_dish(&self, request: &CreateDishRequest) -> ApiResult<Dish> {
        let request = RequestDescriptor::post(DISHES_PATH).with_json(request)?;
        let dish: Dish = self.client.fetch_json(&request).await?;
        tracing::debug!(dish_id = dish.id, "Dish created");
        Ok(dish)
    }

    async fn update_dish(&self, dish_id: i64, request: &UpdateDishRequest) -> ApiResult<Dish> {
        let request = RequestDescriptor::put(dish_path(dish_id)).with_json(request)?;
        self.client.fetch_json(&request).await
    }

    async fn delete_dish(&self, dish_id: i64) -> ApiResult<()> {
        self.client
            .send(&RequestDescriptor::delete(dish_path(dish_id)))
            .await
    }
}

fn dish_path(dish_id: i64) -> String {
    format!("{}/{}", DISHES_PATH, dish_id)
}
