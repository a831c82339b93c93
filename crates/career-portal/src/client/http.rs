use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ApiError, PortalApi};
use crate::config::ApiConfig;
use crate::workflows::applications::{
    ApplicationId, ApplicationPayload, ApplicationStatus, SubmissionReceipt,
};
use crate::workflows::jobs::{Job, JobId};

/// reqwest-backed client bound to a single base endpoint.
#[derive(Debug, Clone)]
pub struct HttpPortalClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct JobsEnvelope {
    #[serde(default)]
    jobs: Option<Vec<Job>>,
}

#[derive(Debug, Deserialize)]
struct JobEnvelope {
    job: Job,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpPortalClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| ApiError::InvalidBaseUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        resource: impl FnOnce() -> String,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        if status == StatusCode::NOT_FOUND {
            let resource = resource();
            debug!(%resource, "job service returned 404");
            return Err(ApiError::NotFound { resource });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            });
        warn!(status = status.as_u16(), %message, "job service request failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl PortalApi for HttpPortalClient {
    async fn list_jobs(&self, category: Option<&str>) -> Result<Vec<Job>, ApiError> {
        let url = self.endpoint(&["jobs"]);
        debug!(%url, ?category, "listing jobs");

        let mut request = self.http.get(url);
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            request = request.query(&[("category", category)]);
        }

        let response = request.send().await?;
        let envelope: JobsEnvelope = Self::read_json(response, || "job listing".to_string()).await?;
        Ok(envelope.jobs.unwrap_or_default())
    }

    async fn get_job(&self, job_id: &JobId) -> Result<Job, ApiError> {
        let url = self.endpoint(&["jobs", job_id.as_str()]);
        debug!(%url, "fetching job");

        let response = self.http.get(url).send().await?;
        let envelope: JobEnvelope =
            Self::read_json(response, || format!("job {job_id}")).await?;
        Ok(envelope.job)
    }

    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        let url = self.endpoint(&["applications"]);
        debug!(%url, job_id = %payload.job_id, "submitting application");

        let response = self.http.post(url).json(payload).send().await?;
        Self::read_json(response, || "application endpoint".to_string()).await
    }

    async fn get_application_status(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationStatus, ApiError> {
        let url = self.endpoint(&["applications", application_id.as_str()]);
        debug!(%url, "fetching application status");

        let response = self.http.get(url).send().await?;
        Self::read_json(response, || format!("application {application_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpPortalClient {
        HttpPortalClient::new(&ApiConfig::new(base).expect("valid base")).expect("client builds")
    }

    #[test]
    fn endpoint_appends_encoded_segments_to_base_path() {
        let client = client("https://api.example.com/prod");
        let url = client.endpoint(&["applications", "APP 1/2"]);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/prod/applications/APP%201%2F2"
        );
    }

    #[test]
    fn endpoint_handles_root_base() {
        let client = client("http://127.0.0.1:8080");
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/");
        assert_eq!(
            client.endpoint(&["jobs"]).as_str(),
            "http://127.0.0.1:8080/jobs"
        );
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let config = ApiConfig {
            base_url: "mailto:jobs@example.com".to_string(),
            timeout: std::time::Duration::from_secs(1),
        };
        assert!(matches!(
            HttpPortalClient::new(&config),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
