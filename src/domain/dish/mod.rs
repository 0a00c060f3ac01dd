pub mod model;
pub mod service;

pub use model::{CreateDishRequest, Dish, DishFilter, UpdateDishRequest};
pub use service::{DishService, DishServiceApi};
