use serde::Serialize;

use crate::workflows::applications::ApplicationStatusCode;

/// Fixed four-step progression shown to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ProgressStep {
    ApplicationSubmitted,
    ResumeScreening,
    PhoneInterview,
    InterviewScheduled,
}

impl ProgressStep {
    pub const ALL: [ProgressStep; 4] = [
        ProgressStep::ApplicationSubmitted,
        ProgressStep::ResumeScreening,
        ProgressStep::PhoneInterview,
        ProgressStep::InterviewScheduled,
    ];

    pub const fn index(self) -> usize {
        match self {
            ProgressStep::ApplicationSubmitted => 0,
            ProgressStep::ResumeScreening => 1,
            ProgressStep::PhoneInterview => 2,
            ProgressStep::InterviewScheduled => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProgressStep::ApplicationSubmitted => "Application Submitted",
            ProgressStep::ResumeScreening => "Resume Screening",
            ProgressStep::PhoneInterview => "Phone Interview",
            ProgressStep::InterviewScheduled => "Interview Scheduled",
        }
    }
}

/// Step reached by a status code. Unrecognised codes sit at the first step.
pub fn progress_step(code: &ApplicationStatusCode) -> ProgressStep {
    match code {
        ApplicationStatusCode::Submitted => ProgressStep::ApplicationSubmitted,
        ApplicationStatusCode::Extracted
        | ApplicationStatusCode::Screened
        | ApplicationStatusCode::Ranked => ProgressStep::ResumeScreening,
        ApplicationStatusCode::PhoneInterviewInitiated
        | ApplicationStatusCode::PhoneInterviewCompleted => ProgressStep::PhoneInterview,
        ApplicationStatusCode::InterviewScheduled => ProgressStep::InterviewScheduled,
        ApplicationStatusCode::Other(_) => ProgressStep::ApplicationSubmitted,
    }
}

pub fn status_message(code: &ApplicationStatusCode) -> &'static str {
    match code {
        ApplicationStatusCode::Submitted => {
            "Your application has been received. We will begin processing it shortly."
        }
        ApplicationStatusCode::Extracted => "We are currently reviewing your resume.",
        ApplicationStatusCode::Screened => {
            "Your resume has been screened and is being evaluated."
        }
        ApplicationStatusCode::Ranked => {
            "Your application has been ranked among other candidates."
        }
        ApplicationStatusCode::PhoneInterviewInitiated => {
            "We are preparing to conduct a phone interview. Please expect a call soon."
        }
        ApplicationStatusCode::PhoneInterviewCompleted => {
            "Your phone interview has been completed. We are evaluating your responses."
        }
        ApplicationStatusCode::InterviewScheduled => {
            "Congratulations! You have been selected for an interview."
        }
        ApplicationStatusCode::Other(_) => "Your application is being processed.",
    }
}
