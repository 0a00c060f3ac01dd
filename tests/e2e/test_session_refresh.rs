use crate::e2e::helpers;

use futures::future::join_all;
use helpers::assertions::{assert_http_error, assert_session, assert_tokens_cleared};
use helpers::mock_backend::RefreshMode;
use helpers::TestContext;
use nutrition_client::domain::dish::{DishFilter, DishService, DishServiceApi};
use nutrition_client::ApiError;
use std::time::Duration;
use test_context::test_context;

const DISHES: &str = "/api/v1/dishes";
const REFRESH: &str = "/api/v1/auth/refresh";
const LOGOUT: &str = "/api/v1/auth/logout";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refresh_and_replay_after_unauthorized(ctx: &mut TestContext) {
    ctx.sign_in_with_stale_token();
    let dishes = DishService::new(ctx.client.clone());

    let result = dishes.list_dishes(&DishFilter::default()).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(ctx.backend.hits("GET", DISHES), 2);
    assert_eq!(ctx.backend.hits("POST", REFRESH), 1);
    assert_eq!(ctx.backend.hits("POST", LOGOUT), 0);
    assert_session(&ctx.token_store, "access-1", "refresh-0");
    assert_eq!(
        ctx.backend.last_header("GET", DISHES, "authorization").as_deref(),
        Some("Bearer access-1")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_store_rotated_refresh_token(ctx: &mut TestContext) {
    ctx.backend.set_refresh_mode(RefreshMode::Rotate);
    ctx.sign_in_with_stale_token();
    let dishes = DishService::new(ctx.client.clone());

    dishes.get_dish(1).await.unwrap();

    assert_session(&ctx.token_store, "access-1", "refresh-1");
    assert_eq!(ctx.backend.current_refresh_token(), "refresh-1");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_expire_session_when_no_refresh_token_is_stored(ctx: &mut TestContext) {
    let dishes = DishService::new(ctx.client.clone());

    let error = dishes.list_dishes(&DishFilter::default()).await.unwrap_err();

    assert!(matches!(error, ApiError::SessionExpired));
    assert_eq!(error.status(), 401);
    assert_eq!(error.message(), "Session expired. Please log in again.");
    assert_eq!(ctx.backend.hits("GET", DISHES), 1);
    assert_eq!(ctx.backend.hits("POST", REFRESH), 0);
    assert_eq!(ctx.backend.hits("POST", LOGOUT), 1);
    assert_tokens_cleared(&ctx.token_store);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_log_out_when_refresh_token_is_rejected(ctx: &mut TestContext) {
    ctx.backend.set_refresh_mode(RefreshMode::Reject);
    ctx.sign_in_with_stale_token();
    let dishes = DishService::new(ctx.client.clone());

    let error = dishes.get_dish(1).await.unwrap_err();

    match &error {
        ApiError::RefreshFailed { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid refresh token");
        }
        other => panic!("expected RefreshFailed, got {:?}", other),
    }
    assert!(error.is_auth_failure());
    assert_eq!(ctx.backend.hits("GET", "/api/v1/dishes/1"), 1);
    assert_eq!(ctx.backend.hits("POST", REFRESH), 1);
    assert_eq!(ctx.backend.hits("POST", LOGOUT), 1);
    assert_tokens_cleared(&ctx.token_store);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_refresh_status_when_refresh_endpoint_fails(ctx: &mut TestContext) {
    ctx.backend.set_refresh_mode(RefreshMode::Fail);
    ctx.sign_in_with_stale_token();
    let dishes = DishService::new(ctx.client.clone());

    let error = dishes.get_dish(1).await.unwrap_err();

    assert!(matches!(error, ApiError::RefreshFailed { .. }));
    assert_eq!(error.status(), 500);
    assert_eq!(error.message(), "Refresh backend unavailable");
    assert_tokens_cleared(&ctx.token_store);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_up_when_replayed_request_is_still_unauthorized(ctx: &mut TestContext) {
    ctx.backend.reject_all_tokens();
    ctx.sign_in();
    let dishes = DishService::new(ctx.client.clone());

    let error = dishes.list_dishes(&DishFilter::default()).await.unwrap_err();

    assert!(matches!(error, ApiError::SessionExpired));
    assert_eq!(error.status(), 401);
    assert_eq!(error.message(), "Session expired. Please log in again.");
    assert_eq!(ctx.backend.hits("GET", DISHES), 2);
    assert_eq!(ctx.backend.hits("POST", REFRESH), 1);
    assert_eq!(ctx.backend.hits("POST", LOGOUT), 1);
    assert_tokens_cleared(&ctx.token_store);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_leave_other_errors_alone(ctx: &mut TestContext) {
    ctx.sign_in();
    let dishes = DishService::new(ctx.client.clone());

    let error = dishes.get_dish(404).await.unwrap_err();

    assert_http_error(&error, 404, "Dish not found");
    assert_eq!(ctx.backend.hits("POST", REFRESH), 0);
    assert_session(&ctx.token_store, "access-0", "refresh-0");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refresh_once_for_concurrent_unauthorized_requests(ctx: &mut TestContext) {
    ctx.backend.set_refresh_delay(Duration::from_millis(200));
    ctx.sign_in_with_stale_token();
    let dishes = DishService::new(ctx.client.clone());
    let filter = DishFilter::default();

    let results = join_all((0..5).map(|_| dishes.list_dishes(&filter))).await;

    for result in results {
        assert_eq!(result.unwrap().len(), 2);
    }
    assert_eq!(ctx.backend.hits("POST", REFRESH), 1);
    assert_eq!(ctx.backend.hits("GET", DISHES), 10);
    assert_session(&ctx.token_store, "access-1", "refresh-0");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serialize_manual_refresh_with_automatic_recovery(ctx: &mut TestContext) {
    ctx.backend.set_refresh_mode(RefreshMode::Rotate);
    ctx.backend.set_refresh_delay(Duration::from_millis(200));
    ctx.sign_in_with_stale_token();
    let auth = ctx.auth_service();
    let dishes = DishService::new(ctx.client.clone());

    let (refreshed, dish) = tokio::join!(auth.refresh(), dishes.get_dish(1));

    // Rotation rejects a refresh token presented twice, so overlapping refreshes would fail
    refreshed.unwrap();
    assert_eq!(dish.unwrap().id, 1);
    assert_eq!(ctx.backend.hits("POST", LOGOUT), 0);
    assert_session(
        &ctx.token_store,
        &ctx.backend.current_access_token(),
        &ctx.backend.current_refresh_token(),
    );
}
