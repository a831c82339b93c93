use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;

use super::{ApiError, PortalApi};
use crate::workflows::applications::{
    ApplicationId, ApplicationPayload, ApplicationStatus, ApplicationStatusCode, SubmissionReceipt,
};
use crate::workflows::jobs::{Job, JobId};

/// Scripted answer for one status lookup.
#[derive(Debug, Clone)]
pub(crate) enum StatusReply {
    Code(&'static str),
    Unavailable,
}

/// In-memory stand-in for the remote service that records every call.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPortal {
    submissions: Mutex<Vec<ApplicationPayload>>,
    submit_failures: AtomicUsize,
    status_script: Mutex<VecDeque<StatusReply>>,
    status_fallback: Mutex<Option<StatusReply>>,
    status_calls: AtomicUsize,
}

impl ScriptedPortal {
    pub(crate) fn accepting() -> Self {
        Self::default()
    }

    /// Fails the next `count` submissions with a 502.
    pub(crate) fn failing_submissions(count: usize) -> Self {
        let portal = Self::default();
        portal.submit_failures.store(count, Ordering::SeqCst);
        portal
    }

    /// Replies in order, then repeats the final reply.
    pub(crate) fn with_statuses(replies: Vec<StatusReply>) -> Self {
        let portal = Self::default();
        *portal.status_fallback.lock().expect("fallback mutex poisoned") = replies.last().cloned();
        *portal.status_script.lock().expect("script mutex poisoned") = replies.into();
        portal
    }

    pub(crate) fn submissions(&self) -> Vec<ApplicationPayload> {
        self.submissions
            .lock()
            .expect("submissions mutex poisoned")
            .clone()
    }

    pub(crate) fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn sample_status(id: &str, code: &str) -> ApplicationStatus {
    let submitted = NaiveDate::from_ymd_opt(2025, 5, 1)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp");
    ApplicationStatus {
        application_id: ApplicationId::from(id),
        job_id: JobId::from("JOB-1"),
        status: ApplicationStatusCode::from(code.to_string()),
        submission_date: submitted,
        updated_date: submitted,
    }
}

impl PortalApi for ScriptedPortal {
    async fn list_jobs(&self, _category: Option<&str>) -> Result<Vec<Job>, ApiError> {
        Ok(Vec::new())
    }

    async fn get_job(&self, job_id: &JobId) -> Result<Job, ApiError> {
        Err(ApiError::NotFound {
            resource: format!("job {job_id}"),
        })
    }

    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.submissions
            .lock()
            .expect("submissions mutex poisoned")
            .push(payload.clone());

        let remaining = self.submit_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.submit_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::Status {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }

        Ok(SubmissionReceipt {
            application_id: ApplicationId::from("APP123"),
            status: ApplicationStatusCode::Submitted,
            message: Some("Application submitted successfully".to_string()),
        })
    }

    async fn get_application_status(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let reply = {
            let mut script = self.status_script.lock().expect("script mutex poisoned");
            script.pop_front()
        }
        .or_else(|| {
            self.status_fallback
                .lock()
                .expect("fallback mutex poisoned")
                .clone()
        });

        match reply {
            Some(StatusReply::Code(code)) => Ok(sample_status(application_id.as_str(), code)),
            Some(StatusReply::Unavailable) => Err(ApiError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
            None => Err(ApiError::NotFound {
                resource: format!("application {application_id}"),
            }),
        }
    }
}
