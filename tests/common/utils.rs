use std::net::TcpListener;
use std::sync::Arc;

use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use matchday_backend::config::settings::{get_config, DatabaseSettings};
use matchday_backend::run;
use matchday_backend::services::{FootballApiClient, MatchSyncService};
use matchday_backend::telemetry::{get_subscriber, init_subscriber};
use matchday_backend::utils::clock::{Clock, SystemClock};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub sync_service: Arc<MatchSyncService>,
}

/// Spin the whole application up on a random port against a throwaway
/// database. The provider base url points nowhere; tests that sync pass a
/// stub's url via `spawn_app_with_provider`.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_provider("http://127.0.0.1:9".to_string()).await
}

pub async fn spawn_app_with_provider(provider_base_url: String) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.football.base_url = provider_base_url;
    configuration.football.api_token =
        Some(SecretString::new("test-token".to_string().into_boxed_str()));
    // No waiting between requests against the in-process stub
    configuration.football.rate_limit_seconds = 0;

    let connection_pool = configure_db(&configuration.database).await;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let football_client = Arc::new(
        FootballApiClient::new(&configuration.football, clock)
            .expect("Failed to create Football Data client"),
    );
    let sync_service = Arc::new(MatchSyncService::new(
        connection_pool.clone(),
        football_client,
        configuration.sync.clone(),
    ));

    let server = run(listener, connection_pool.clone(), sync_service.clone())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        sync_service,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
