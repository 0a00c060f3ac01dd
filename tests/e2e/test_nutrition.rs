use crate::e2e::helpers;

use chrono::NaiveDate;
use helpers::assertions::{assert_http_error, assert_session};
use helpers::mock_backend::PASSWORD;
use helpers::TestContext;
use nutrition_client::domain::dish::{
    CreateDishRequest, DishService, DishServiceApi, UpdateDishRequest,
};
use nutrition_client::domain::intake::{IntakeFilter, IntakeService, IntakeServiceApi};
use nutrition_client::domain::profile::{ProfileService, UpdateProfileRequest};
use nutrition_client::domain::shared::{Nutrients, Pagination};
use nutrition_client::domain::user::UserService;
use pretty_assertions::assert_eq;
use test_context::test_context;

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_and_update_dishes(ctx: &mut TestContext) {
    ctx.sign_in();
    let dishes = DishService::new(ctx.client.clone());

    let created = dishes
        .create_dish(&CreateDishRequest {
            name: "Greek yogurt".to_string(),
            description: Some("Plain, 2% fat".to_string()),
            nutrients: Nutrients::new(73.0, 10.0, 4.0, 2.0),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.nutrients.protein, 10.0);

    let updated = dishes
        .update_dish(
            2,
            &UpdateDishRequest {
                name: Some("Red lentil soup".to_string()),
                ..UpdateDishRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Red lentil soup");
    assert_eq!(updated.nutrients.calories, 120.0);
    assert_eq!(updated.description, None);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_intakes_with_date_filter(ctx: &mut TestContext) {
    ctx.sign_in();
    let intakes = IntakeService::new(ctx.client.clone());

    let listed = intakes
        .list_intakes(&IntakeFilter::between(march(4), march(5)))
        .await
        .unwrap();

    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].dish.as_ref().map(|d| d.name.as_str()), Some("Oatmeal"));
    assert_eq!(
        ctx.backend.last_query("GET", "/api/v1/intakes").as_deref(),
        Some("start_date=2024-03-04&end_date=2024-03-05")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_summarize_intakes_per_day(ctx: &mut TestContext) {
    ctx.sign_in();
    let intakes = IntakeService::new(ctx.client.clone());

    let summary = intakes
        .summarize(&IntakeFilter::between(march(4), march(5)))
        .await
        .unwrap();

    let monday = summary.day(march(4)).unwrap();
    assert_eq!(monday.intake_count, 2);
    // 50 g oatmeal (190 kcal) + 250 g soup (300 kcal)
    assert!((monday.totals.calories - 490.0).abs() < 1e-9);

    let tuesday = summary.day(march(5)).unwrap();
    assert_eq!(tuesday.intake_count, 1);
    assert_eq!(tuesday.totals, Nutrients::default());

    assert_eq!(summary.incomplete_intakes, 1);
    assert!((summary.average_daily_calories() - 245.0).abs() < 1e-9);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_summarize_intakes_across_pages(ctx: &mut TestContext) {
    ctx.sign_in();
    let intakes = IntakeService::new(ctx.client.clone());
    let filter = IntakeFilter {
        pagination: Pagination::new(0, 2),
        ..IntakeFilter::between(march(4), march(5))
    };

    let summary = intakes.summarize(&filter).await.unwrap();

    assert_eq!(ctx.backend.hits("GET", "/api/v1/intakes"), 2);
    assert_eq!(
        ctx.backend.last_query("GET", "/api/v1/intakes").as_deref(),
        Some("skip=2&limit=2&start_date=2024-03-04&end_date=2024-03-05")
    );
    assert_eq!(summary.days.len(), 2);
    assert_eq!(summary.incomplete_intakes, 1);
    assert!((summary.totals.calories - 490.0).abs() < 1e-9);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stop_paging_after_an_empty_page(ctx: &mut TestContext) {
    ctx.sign_in();
    let intakes = IntakeService::new(ctx.client.clone());
    let filter = IntakeFilter {
        pagination: Pagination::new(0, 1),
        ..IntakeFilter::default()
    };

    let summary = intakes.summarize(&filter).await.unwrap();

    // Three full pages of one, then an empty one
    assert_eq!(ctx.backend.hits("GET", "/api/v1/intakes"), 4);
    assert_eq!(summary.days.iter().map(|d| d.intake_count).sum::<usize>(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_compute_remaining_calories_from_profile(ctx: &mut TestContext) {
    ctx.sign_in_with_stale_token();
    let profiles = ProfileService::new(ctx.client.clone());

    let profile = profiles.get_profile().await.unwrap();

    assert_eq!(profile.id, 7);
    assert_eq!(profile.remaining_calories(490.0), Some(1510.0));
    assert_eq!(ctx.backend.hits("POST", "/api/v1/auth/refresh"), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_profile_goals(ctx: &mut TestContext) {
    ctx.sign_in();
    let profiles = ProfileService::new(ctx.client.clone());

    let profile = profiles
        .update_profile(&UpdateProfileRequest {
            daily_calorie_goal: Some(1800.0),
            ..UpdateProfileRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(profile.daily_calorie_goal, Some(1800.0));
    assert_eq!(profile.full_name.as_deref(), Some("Jane Doe"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_change_password(ctx: &mut TestContext) {
    ctx.sign_in();
    let profiles = ProfileService::new(ctx.client.clone());

    profiles.change_password(PASSWORD, "n3w-secret").await.unwrap();

    let error = profiles
        .change_password("wrong", "n3w-secret")
        .await
        .unwrap_err();
    assert_http_error(&error, 400, "Incorrect password");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_treat_forbidden_as_expired_session(ctx: &mut TestContext) {
    ctx.sign_in();
    let users = UserService::new(ctx.client.clone());

    let error = users.list_users(Pagination::default()).await.unwrap_err();

    assert_http_error(&error, 403, "The user doesn't have enough privileges");
    assert!(!error.is_auth_failure());
    assert_eq!(ctx.backend.hits("POST", "/api/v1/auth/refresh"), 0);
    assert_session(&ctx.token_store, "access-0", "refresh-0");
}
