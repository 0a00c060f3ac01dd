use crate::e2e::helpers;

use helpers::assertions::assert_tokens_cleared;
use helpers::mock_backend::LogoutMode;
use helpers::{unreachable_base_url, TestContext};
use nutrition_client::infrastructure::config::Config;
use nutrition_client::infrastructure::storage::MemoryStorage;
use nutrition_client::{ApiClient, TokenStore};
use std::sync::Arc;
use std::time::Duration;
use test_context::test_context;
use tokio::net::TcpListener;

const LOGOUT: &str = "/api/v1/auth/logout";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_invalidate_server_session_and_clear_tokens(ctx: &mut TestContext) {
    ctx.sign_in();

    ctx.auth_service().logout().await;

    assert_eq!(ctx.backend.hits("POST", LOGOUT), 1);
    assert_eq!(
        ctx.backend.last_header("POST", LOGOUT, "authorization").as_deref(),
        Some("Bearer access-0")
    );
    assert_tokens_cleared(&ctx.token_store);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_clear_tokens_when_server_logout_fails(ctx: &mut TestContext) {
    ctx.backend.set_logout_mode(LogoutMode::Fail);
    ctx.sign_in();

    ctx.client.logout().await;

    assert_eq!(ctx.backend.hits("POST", LOGOUT), 1);
    assert_tokens_cleared(&ctx.token_store);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_post_logout_even_without_a_session(ctx: &mut TestContext) {
    ctx.client.logout().await;

    assert_eq!(ctx.backend.hits("POST", LOGOUT), 1);
    assert_eq!(ctx.backend.last_header("POST", LOGOUT, "authorization"), None);
    assert_tokens_cleared(&ctx.token_store);
}

#[tokio::test]
async fn it_should_clear_tokens_when_server_is_unreachable() {
    let token_store = Arc::new(TokenStore::new(Arc::new(MemoryStorage::new())));
    token_store.set_tokens("access-0", "refresh-0", 1800);
    let client = ApiClient::new(&Config::for_base_url(&unreachable_base_url()), token_store.clone())
        .unwrap();

    client.logout().await;

    assert_tokens_cleared(&token_store);
}

#[tokio::test]
async fn it_should_clear_tokens_when_logout_is_abandoned() {
    // Accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let token_store = Arc::new(TokenStore::new(Arc::new(MemoryStorage::new())));
    token_store.set_tokens("access-0", "refresh-0", 1800);
    let client = ApiClient::new(&Config::for_base_url(&base_url), token_store.clone()).unwrap();

    let outcome = tokio::time::timeout(Duration::from_millis(200), client.logout()).await;

    assert!(outcome.is_err(), "logout should still be waiting on the server");
    assert_tokens_cleared(&token_store);
}
