use serde::Serialize;

use super::poller::StatusSnapshot;
use super::progress::ProgressStep;
use crate::workflows::applications::ApplicationId;

pub const STATUS_LOADING_MESSAGE: &str = "Loading application status...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepState {
    Complete,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub label: &'static str,
    pub state: StepState,
}

/// Status page contents for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    pub application_id: ApplicationId,
    pub job_id: Option<String>,
    pub status_code: Option<String>,
    pub submitted_label: Option<String>,
    pub updated_label: Option<String>,
    pub message: &'static str,
    pub error: Option<&'static str>,
    pub loading: bool,
    pub steps: Vec<StepView>,
}

impl StatusBoard {
    pub fn new(application_id: &ApplicationId, snapshot: &StatusSnapshot) -> Self {
        let current = snapshot.step();
        let steps = ProgressStep::ALL
            .into_iter()
            .map(|step| StepView {
                label: step.label(),
                state: if step < current {
                    StepState::Complete
                } else if step == current {
                    StepState::Active
                } else {
                    StepState::Pending
                },
            })
            .collect();

        let status = snapshot.status.as_ref();
        Self {
            application_id: application_id.clone(),
            job_id: status.map(|status| status.job_id.to_string()),
            status_code: status.map(|status| status.status.to_string()),
            submitted_label: status
                .map(|status| status.submission_date.format("%B %-d, %Y").to_string()),
            updated_label: status
                .map(|status| status.updated_date.format("%B %-d, %Y %H:%M").to_string()),
            message: snapshot.message().unwrap_or(STATUS_LOADING_MESSAGE),
            error: snapshot.error,
            loading: snapshot.loading,
            steps,
        }
    }

    pub fn current_step(&self) -> Option<&StepView> {
        self.steps
            .iter()
            .find(|step| step.state == StepState::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::sample_status;
    use crate::workflows::tracking::STATUS_LOAD_FAILED;

    #[test]
    fn board_marks_earlier_steps_complete() {
        let snapshot = StatusSnapshot {
            status: Some(sample_status("APP123", "PHONE_INTERVIEW_COMPLETED")),
            fetches: 1,
            ..StatusSnapshot::default()
        };

        let board = StatusBoard::new(&ApplicationId::from("APP123"), &snapshot);

        let states: Vec<StepState> = board.steps.iter().map(|step| step.state).collect();
        assert_eq!(
            states,
            vec![
                StepState::Complete,
                StepState::Complete,
                StepState::Active,
                StepState::Pending
            ]
        );
        assert_eq!(
            board.current_step().map(|step| step.label),
            Some("Phone Interview")
        );
        assert_eq!(board.submitted_label.as_deref(), Some("May 1, 2025"));
        assert_eq!(board.status_code.as_deref(), Some("PHONE_INTERVIEW_COMPLETED"));
    }

    #[test]
    fn board_before_first_fetch_shows_loading_on_first_step() {
        let snapshot = StatusSnapshot {
            loading: true,
            ..StatusSnapshot::default()
        };

        let board = StatusBoard::new(&ApplicationId::from("APP1"), &snapshot);

        assert_eq!(board.message, STATUS_LOADING_MESSAGE);
        assert!(board.loading);
        assert_eq!(board.steps[0].state, StepState::Active);
        assert_eq!(board.job_id, None);
    }

    #[test]
    fn board_carries_error_banner_with_last_status() {
        let snapshot = StatusSnapshot {
            status: Some(sample_status("APP2", "SUBMITTED")),
            error: Some(STATUS_LOAD_FAILED),
            loading: false,
            fetches: 2,
        };

        let board = StatusBoard::new(&ApplicationId::from("APP2"), &snapshot);

        assert_eq!(board.error, Some(STATUS_LOAD_FAILED));
        assert_eq!(
            board.message,
            "Your application has been received. We will begin processing it shortly."
        );
    }
}
