use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::progress::{progress_step, status_message, ProgressStep};
use crate::client::{ApiError, PortalApi};
use crate::config::TrackingConfig;
use crate::workflows::applications::{ApplicationId, ApplicationStatus};

pub const STATUS_LOAD_FAILED: &str = "Failed to load application status. Please try again later.";

/// What the status view shows after the latest fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Last successfully fetched status. Survives later failures.
    pub status: Option<ApplicationStatus>,
    pub error: Option<&'static str>,
    pub loading: bool,
    /// Completed fetches, successful or not.
    pub fetches: u64,
}

impl StatusSnapshot {
    pub fn step(&self) -> ProgressStep {
        self.status
            .as_ref()
            .map(|status| progress_step(&status.status))
            .unwrap_or(ProgressStep::ApplicationSubmitted)
    }

    pub fn message(&self) -> Option<&'static str> {
        self.status
            .as_ref()
            .map(|status| status_message(&status.status))
    }

    fn record(&mut self, outcome: Result<ApplicationStatus, ApiError>) {
        self.loading = false;
        self.fetches += 1;
        match outcome {
            Ok(status) => {
                self.status = Some(status);
                self.error = None;
            }
            Err(_) => self.error = Some(STATUS_LOAD_FAILED),
        }
    }
}

/// Starts status polling for the application view.
#[derive(Debug)]
pub struct StatusPoller<A> {
    api: Arc<A>,
    interval: Duration,
}

impl<A> Clone for StatusPoller<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            interval: self.interval,
        }
    }
}

impl<A> StatusPoller<A>
where
    A: PortalApi + 'static,
{
    pub fn new(api: Arc<A>, interval: Duration) -> Self {
        Self {
            api,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(api: Arc<A>, config: &TrackingConfig) -> Self {
        Self::new(api, config.poll_interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetches immediately, then every interval until the returned watch is
    /// deactivated or dropped. Without an identifier nothing is fetched.
    pub fn activate(&self, application_id: Option<ApplicationId>) -> Option<StatusWatch> {
        let Some(application_id) = application_id else {
            debug!("status view opened without an application id, not polling");
            return None;
        };

        let token = CancellationToken::new();
        let (updates, receiver) = watch::channel(StatusSnapshot {
            loading: true,
            ..StatusSnapshot::default()
        });

        info!(
            application_id = %application_id,
            interval_secs = self.interval.as_secs_f64(),
            "status polling started"
        );
        let task = tokio::spawn(poll_status(
            Arc::clone(&self.api),
            application_id.clone(),
            self.interval,
            updates,
            token.clone(),
        ));

        Some(StatusWatch {
            application_id,
            token,
            updates: receiver,
            task: Some(task),
        })
    }
}

async fn poll_status<A: PortalApi>(
    api: Arc<A>,
    application_id: ApplicationId,
    every: Duration,
    updates: watch::Sender<StatusSnapshot>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // Readers may see the flag; it is not worth a wake-up on its own.
        updates.send_if_modified(|snapshot| {
            snapshot.loading = true;
            false
        });

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            outcome = api.get_application_status(&application_id) => outcome,
        };

        match &outcome {
            Ok(status) => debug!(
                application_id = %application_id,
                status = %status.status,
                "application status fetched"
            ),
            Err(err) => warn!(
                application_id = %application_id,
                error = %err,
                "application status fetch failed"
            ),
        }
        updates.send_modify(|snapshot| snapshot.record(outcome));
    }

    debug!(application_id = %application_id, "status polling stopped");
}

/// Handle to an active status view. Dropping it stops the polling task.
#[derive(Debug)]
pub struct StatusWatch {
    application_id: ApplicationId,
    token: CancellationToken,
    updates: watch::Receiver<StatusSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl StatusWatch {
    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.updates.borrow().clone()
    }

    /// Waits for the next completed fetch. `None` once polling has stopped.
    pub async fn changed(&mut self) -> Option<StatusSnapshot> {
        self.updates.changed().await.ok()?;
        Some(self.updates.borrow_and_update().clone())
    }

    /// Stops polling and waits for the task to wind down.
    pub async fn deactivate(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(application_id = %self.application_id, error = %err, "status task ended abnormally");
            }
        }
        info!(application_id = %self.application_id, "status polling deactivated");
    }
}

impl Drop for StatusWatch {
    fn drop(&mut self) {
        if !self.token.is_cancelled() {
            self.token.cancel();
            debug!(application_id = %self.application_id, "status watch dropped, polling cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{ScriptedPortal, StatusReply};
    use crate::workflows::applications::ApplicationStatusCode;

    const EVERY: Duration = Duration::from_secs(30);

    fn poller(portal: &Arc<ScriptedPortal>) -> StatusPoller<ScriptedPortal> {
        StatusPoller::new(Arc::clone(portal), EVERY)
    }

    #[tokio::test(start_paused = true)]
    async fn ranked_application_reports_screening_and_stops_after_deactivation() {
        let portal = Arc::new(ScriptedPortal::with_statuses(vec![StatusReply::Code(
            "RANKED",
        )]));
        let mut watch = poller(&portal)
            .activate(Some(ApplicationId::from("APP123")))
            .expect("watch started");

        let snapshot = watch.changed().await.expect("first fetch");
        assert_eq!(snapshot.step(), ProgressStep::ResumeScreening);
        assert_eq!(snapshot.step().index(), 1);
        assert_eq!(
            snapshot.message(),
            Some("Your application has been ranked among other candidates.")
        );
        assert_eq!(snapshot.error, None);
        assert!(!snapshot.loading);
        assert_eq!(portal.status_calls(), 1);

        watch.deactivate().await;
        tokio::time::sleep(EVERY * 4).await;
        assert_eq!(portal.status_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_again_on_each_interval() {
        let portal = Arc::new(ScriptedPortal::with_statuses(vec![
            StatusReply::Code("SUBMITTED"),
            StatusReply::Code("EXTRACTED"),
        ]));
        let mut watch = poller(&portal)
            .activate(Some(ApplicationId::from("APP123")))
            .expect("watch started");

        let first = watch.changed().await.expect("first fetch");
        assert_eq!(first.step(), ProgressStep::ApplicationSubmitted);

        let second = watch.changed().await.expect("second fetch");
        assert_eq!(
            second.status.map(|status| status.status),
            Some(ApplicationStatusCode::Extracted)
        );
        assert_eq!(second.fetches, 2);
        assert_eq!(portal.status_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_last_status_and_later_success_clears_banner() {
        let portal = Arc::new(ScriptedPortal::with_statuses(vec![
            StatusReply::Code("RANKED"),
            StatusReply::Unavailable,
            StatusReply::Code("INTERVIEW_SCHEDULED"),
        ]));
        let mut watch = poller(&portal)
            .activate(Some(ApplicationId::from("APP123")))
            .expect("watch started");

        watch.changed().await.expect("first fetch");

        let failed = watch.changed().await.expect("second fetch");
        assert_eq!(failed.error, Some(STATUS_LOAD_FAILED));
        assert_eq!(failed.step(), ProgressStep::ResumeScreening);
        assert_eq!(
            failed.status.as_ref().map(|status| &status.status),
            Some(&ApplicationStatusCode::Ranked)
        );

        let recovered = watch.changed().await.expect("third fetch");
        assert_eq!(recovered.error, None);
        assert_eq!(recovered.step(), ProgressStep::InterviewScheduled);
        assert_eq!(
            recovered.message(),
            Some("Congratulations! You have been selected for an interview.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_identifier_spawns_nothing() {
        let portal = Arc::new(ScriptedPortal::accepting());

        assert!(poller(&portal).activate(None).is_none());
        tokio::time::sleep(EVERY * 2).await;
        assert_eq!(portal.status_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_watch_cancels_polling() {
        let portal = Arc::new(ScriptedPortal::with_statuses(vec![StatusReply::Code(
            "SCREENED",
        )]));
        let mut watch = poller(&portal)
            .activate(Some(ApplicationId::from("APP9")))
            .expect("watch started");
        watch.changed().await.expect("first fetch");
        assert!(watch.is_active());

        drop(watch);
        tokio::time::sleep(EVERY * 3).await;
        assert_eq!(portal.status_calls(), 1);
    }
}
