//! Access to the remote job/application service.
//!
//! [`PortalApi`] is the seam the workflows depend on; [`HttpPortalClient`] is
//! the production implementation. Failures are handed back unchanged: no
//! retries, no caching.

mod http;
#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

use crate::workflows::applications::{
    ApplicationId, ApplicationPayload, ApplicationStatus, SubmissionReceipt,
};
use crate::workflows::jobs::{Job, JobId};

pub use http::HttpPortalClient;

/// The four operations the portal performs against the remote service.
pub trait PortalApi: Send + Sync {
    fn list_jobs(
        &self,
        category: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Job>, ApiError>> + Send;

    fn get_job(&self, job_id: &JobId) -> impl Future<Output = Result<Job, ApiError>> + Send;

    fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> impl Future<Output = Result<SubmissionReceipt, ApiError>> + Send;

    fn get_application_status(
        &self,
        application_id: &ApplicationId,
    ) -> impl Future<Output = Result<ApplicationStatus, ApiError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to job service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("job service responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("job service base URL '{0}' cannot carry request paths")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
