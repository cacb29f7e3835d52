use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use matchday_backend::config::settings::get_config;
use matchday_backend::run;
use matchday_backend::services::{FootballApiClient, MatchSyncService, SchedulerService};
use matchday_backend::telemetry::{get_subscriber, init_subscriber};
use matchday_backend::utils::clock::{Clock, SystemClock};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "matchday-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    // Only try to establish connections when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .connect_lazy(config.database.connection_string().expose_secret())
        .expect("Failed to create Postgres connection pool");

    // A missing provider token is a misconfiguration, not something to
    // limp along without
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let football_client = match FootballApiClient::new(&config.football, clock) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Failed to create Football Data client: {}", e);
            std::process::exit(1);
        }
    };

    let sync_service = Arc::new(MatchSyncService::new(
        connection_pool.clone(),
        football_client,
        config.sync.clone(),
    ));

    let scheduler = match SchedulerService::new(sync_service.clone(), config.sync.schedule.clone())
        .await
    {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Failed to create scheduler service: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = scheduler.start().await {
        tracing::error!("Failed to start scheduler: {}", e);
        std::process::exit(1);
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;

    run(listener, connection_pool, sync_service)?.await
}
