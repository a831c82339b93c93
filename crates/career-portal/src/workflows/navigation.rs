use std::fmt;
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Url;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use super::applications::ApplicationId;
use super::jobs::JobId;

// Routes are paths, not URLs; the base only serves query encoding.
static ROUTE_BASE: Lazy<Url> = Lazy::new(|| Url::parse("http://portal.local/").unwrap());

/// Portal views, addressed solely by job/application identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    JobListing { category: Option<String> },
    JobDetail(JobId),
    ApplicationForm(JobId),
    ApplicationStatus(ApplicationId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::JobListing { category: None } => "/".to_string(),
            Route::JobListing {
                category: Some(category),
            } => {
                let mut url = ROUTE_BASE.clone();
                url.query_pairs_mut().append_pair("category", category);
                format!("/?{}", url.query().unwrap_or_default())
            }
            Route::JobDetail(job_id) => format!("/jobs/{job_id}"),
            Route::ApplicationForm(job_id) => format!("/jobs/{job_id}/apply"),
            Route::ApplicationStatus(application_id) => {
                format!("/application-status/{application_id}")
            }
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::JobListing {
                category: query.and_then(category_from_query),
            }),
            ["jobs", id] => Some(Route::JobDetail(JobId::from(*id))),
            ["jobs", id, "apply"] => Some(Route::ApplicationForm(JobId::from(*id))),
            ["application-status", id] => {
                Some(Route::ApplicationStatus(ApplicationId::from(*id)))
            }
            _ => None,
        }
    }
}

fn category_from_query(query: &str) -> Option<String> {
    let mut url = ROUTE_BASE.clone();
    url.set_query(Some(query));
    let category = url
        .query_pairs()
        .find(|(key, _)| key == "category")
        .map(|(_, value)| value.into_owned());
    category.filter(|category| !category.trim().is_empty())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation requests issued by the workflows.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl Navigator for UnboundedSender<Route> {
    fn navigate(&self, route: Route) {
        if let Err(err) = self.send(route) {
            warn!(route = %err.0, "navigation dropped, no active view loop");
        }
    }
}

/// Deferred navigation scheduled after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub delay: Duration,
}

impl Redirect {
    /// Waits out the delay, then navigates.
    pub async fn follow<N: Navigator>(self, navigator: N) {
        tokio::time::sleep(self.delay).await;
        info!(route = %self.route, "navigating");
        navigator.navigate(self.route);
    }
}
