use std::future::Future;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use career_portal::client::PortalApi;
use career_portal::config::TrackingConfig;
use career_portal::error::AppError;
use career_portal::workflows::applications::{
    ApplicationForm, ApplicationId, FormField, FormPhase, ResumeFile, SubmitError,
    REDIRECTING_MESSAGE, SUBMITTED_MESSAGE,
};
use career_portal::workflows::jobs::{
    export_jobs_csv, JobDetailView, JobId, JobListingView, DETAIL_LOAD_FAILED,
    LISTING_LOAD_FAILED,
};
use career_portal::workflows::navigation::Route;
use career_portal::workflows::tracking::{StatusBoard, StatusPoller, StatusSnapshot};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::render;

/// How long the status view stays open once reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusMode {
    Once,
    Watch,
}

/// Terminal front end over the portal workflows.
pub(crate) struct Session<A> {
    api: Arc<A>,
    tracking: TrackingConfig,
}

impl<A> Session<A>
where
    A: PortalApi + 'static,
{
    pub(crate) fn new(api: Arc<A>, tracking: TrackingConfig) -> Self {
        Self { api, tracking }
    }

    pub(crate) async fn list_jobs<W: Write>(
        &self,
        category: Option<String>,
        export: Option<&Path>,
        out: &mut W,
    ) -> Result<usize, AppError> {
        let category = category.filter(|category| !category.trim().is_empty());
        let jobs = match self.api.list_jobs(category.as_deref()).await {
            Ok(jobs) => jobs,
            Err(err) => {
                writeln!(out, "{LISTING_LOAD_FAILED}")?;
                return Err(err.into());
            }
        };

        let view = JobListingView::new(category, &jobs);
        write!(out, "{}", render::render_listing(&view))?;

        if let Some(path) = export {
            let file = std::fs::File::create(path)?;
            let written = export_jobs_csv(file, &jobs)?;
            info!(path = %path.display(), rows = written, "job listing exported");
            writeln!(out, "Exported {written} jobs to {}", path.display())?;
        }
        Ok(jobs.len())
    }

    pub(crate) async fn show_job<W: Write>(
        &self,
        job_id: &JobId,
        out: &mut W,
    ) -> Result<(), AppError> {
        match self.api.get_job(job_id).await {
            Ok(job) => {
                write!(out, "{}", render::render_job_detail(&JobDetailView::from(&job)))?;
                Ok(())
            }
            Err(err) => {
                writeln!(out, "{DETAIL_LOAD_FAILED}")?;
                Err(err.into())
            }
        }
    }

    /// Fills and submits the application form, then follows the redirect to
    /// the status view unless `status` is `None`.
    pub(crate) async fn apply<W, S>(
        &self,
        job_id: JobId,
        fields: Vec<(FormField, String)>,
        resume: ResumeFile,
        status: Option<StatusMode>,
        stop: S,
        out: &mut W,
    ) -> Result<ApplicationId, AppError>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        let mut form =
            ApplicationForm::new(job_id).with_redirect_delay(self.tracking.redirect_delay);
        for (field, value) in fields {
            form.set_field(field, value);
        }

        let attachment = form.attach_file(resume)?;
        writeln!(out, "{}", render::render_attachment(attachment))?;

        writeln!(out, "Submitting...")?;
        let outcome = form.submit(self.api.as_ref()).await;
        let redirect = match outcome {
            Ok(redirect) => redirect,
            Err(SubmitError::Validation(err)) => {
                write!(out, "{}", render::render_field_errors(&err))?;
                return Err(SubmitError::Validation(err).into());
            }
            Err(err) => {
                if let Some(message) = form.error_message() {
                    writeln!(out, "{message}")?;
                }
                return Err(err.into());
            }
        };

        writeln!(out, "{SUBMITTED_MESSAGE}")?;
        let application_id = match form.phase() {
            FormPhase::Submitted { application_id } => application_id.clone(),
            _ => return Err(SubmitError::Idle.into()),
        };

        let Some(mode) = status else {
            writeln!(out, "Track it at {}", redirect.route)?;
            return Ok(application_id);
        };

        writeln!(out, "{REDIRECTING_MESSAGE}")?;
        let (navigator, mut routes) = mpsc::unbounded_channel();
        redirect.follow(navigator).await;

        let mut stop = std::pin::pin!(stop);
        while let Some(route) = routes.recv().await {
            self.open(route, mode, stop.as_mut(), out).await?;
        }
        Ok(application_id)
    }

    /// Renders whichever view a navigation request points at.
    async fn open<W, S>(
        &self,
        route: Route,
        mode: StatusMode,
        stop: S,
        out: &mut W,
    ) -> Result<(), AppError>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        info!(%route, "opening view");
        match route {
            Route::JobListing { category } => {
                self.list_jobs(category, None, out).await?;
            }
            Route::JobDetail(job_id) => self.show_job(&job_id, out).await?,
            Route::ApplicationForm(job_id) => {
                writeln!(out, "Apply with: portal apply {job_id} --resume <PATH>")?;
            }
            Route::ApplicationStatus(application_id) => {
                self.track(application_id, mode, stop, out).await?;
            }
        }
        Ok(())
    }

    /// Shows the status board after each fetch. In `Watch` mode polling
    /// continues until `stop` resolves.
    pub(crate) async fn track<W, S>(
        &self,
        application_id: ApplicationId,
        mode: StatusMode,
        stop: S,
        out: &mut W,
    ) -> Result<Option<StatusSnapshot>, AppError>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        let poller = StatusPoller::from_config(Arc::clone(&self.api), &self.tracking);
        let Some(mut watch) = poller.activate(Some(application_id.clone())) else {
            return Ok(None);
        };

        let mut stop = std::pin::pin!(stop);
        let mut latest = None;
        loop {
            tokio::select! {
                _ = stop.as_mut() => {
                    info!(application_id = %application_id, "status view closed");
                    break;
                }
                next = watch.changed() => {
                    let Some(snapshot) = next else {
                        warn!(application_id = %application_id, "status updates ended");
                        break;
                    };
                    let board = StatusBoard::new(&application_id, &snapshot);
                    writeln!(out, "{}", render::render_status_board(&board))?;
                    latest = Some(snapshot);
                    if mode == StatusMode::Once {
                        break;
                    }
                }
            }
        }

        watch.deactivate().await;
        Ok(latest)
    }
}
