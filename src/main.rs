use chrono::Utc;
use nutrition_client::domain::auth::{AuthService, LoginOutcome};
use nutrition_client::domain::intake::{IntakeFilter, IntakeService, IntakeServiceApi};
use nutrition_client::domain::profile::ProfileService;
use nutrition_client::infrastructure::config::{Config, LogFormat};
use nutrition_client::infrastructure::http::ApiClient;
use nutrition_client::infrastructure::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use nutrition_client::infrastructure::token_store::TokenStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(api_base_url = %config.api_base_url, "Starting nutrition client");

    // Token storage: on disk when a path is configured, otherwise for this run only
    let storage: Arc<dyn KeyValueStorage> = match &config.token_store_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file token storage");
            Arc::new(FileStorage::open(path)?)
        }
        None => {
            tracing::info!("Using in-memory token storage");
            Arc::new(MemoryStorage::new())
        }
    };
    let token_store = Arc::new(TokenStore::new(storage));

    let client = Arc::new(ApiClient::new(&config, token_store.clone())?);

    let auth_service = AuthService::new(client.clone());
    let profile_service = ProfileService::new(client.clone());
    let intake_service = IntakeService::new(client.clone());

    if token_store.refresh_token().is_none() && !auth_service.is_authenticated() {
        let Some(credentials) = &config.credentials else {
            tracing::warn!(
                "No stored session and no credentials; set NUTRITION_EMAIL and NUTRITION_PASSWORD"
            );
            return Ok(());
        };

        match auth_service
            .login(&credentials.email, &credentials.password)
            .await?
        {
            LoginOutcome::Authenticated(_) => {}
            LoginOutcome::OtpRequired(challenge) => {
                let Some(code) = &config.otp_code else {
                    tracing::warn!(
                        expires_in = challenge.expires_in,
                        "Login requires a one-time code; set NUTRITION_OTP and run again"
                    );
                    return Ok(());
                };
                auth_service
                    .verify_login(&challenge.login_request_id, code)
                    .await?;
            }
        }
    }

    let profile = profile_service.get_profile().await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);

    let today = Utc::now().date_naive();
    let summary = intake_service
        .summarize(&IntakeFilter::for_day(today))
        .await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(day) = summary.day(today) {
        if let Some(remaining) = profile.remaining_calories(day.totals.calories) {
            tracing::info!(remaining_kcal = remaining, "Calories left today");
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "nutrition_client=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "nutrition_client=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
