use std::error::Error;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::services::sync_service::MatchSyncService;

/// Runs the match sync on a cron cadence.
///
/// Runs are expected not to overlap; the cadence has to leave room for a
/// full rate-limited pass over the registry (roughly a minute).
pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    sync_service: Arc<MatchSyncService>,
    schedule: String,
}

impl SchedulerService {
    pub async fn new(
        sync_service: Arc<MatchSyncService>,
        schedule: String,
    ) -> Result<Self, Box<dyn Error>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            sync_service,
            schedule,
        })
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error>> {
        let scheduler = self.scheduler.lock().await;

        let sync_service = self.sync_service.clone();
        let sync_job = Job::new_async(self.schedule.as_str(), move |_uuid, _l| {
            let sync_service = sync_service.clone();

            Box::pin(async move {
                tracing::info!("Running scheduled match sync");
                match sync_service.run().await {
                    Ok(report) => {
                        tracing::info!(
                            "Scheduled sync finished: fetched {}, synced {}, skipped {}",
                            report.fetched,
                            report.synced,
                            report.skipped
                        );
                    }
                    Err(e) => {
                        tracing::error!("Scheduled sync failed: {}", e);
                    }
                }
            })
        })?;

        scheduler.add(sync_job).await?;
        scheduler.start().await?;

        tracing::info!("Scheduler service started (schedule '{}')", self.schedule);
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), Box<dyn Error>> {
        let mut scheduler = self.scheduler.lock().await;
        scheduler.shutdown().await?;

        tracing::info!("Scheduler service stopped");
        Ok(())
    }
}
