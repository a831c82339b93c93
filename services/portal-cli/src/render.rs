use std::fmt::Write;

use career_portal::workflows::applications::{FormValidationError, ResumeAttachment};
use career_portal::workflows::jobs::{JobDetailView, JobListingView};
use career_portal::workflows::tracking::{StatusBoard, StepState};

pub(crate) fn render_listing(view: &JobListingView) -> String {
    let mut out = String::new();
    match &view.category_filter {
        Some(category) => {
            let _ = writeln!(out, "Open positions in {category}");
        }
        None => {
            let _ = writeln!(out, "Open positions");
        }
    }

    if let Some(message) = view.empty_message() {
        let _ = writeln!(out, "  {message}");
        return out;
    }

    for card in &view.cards {
        let _ = write!(
            out,
            "- [{}] {} ({}, {})",
            card.id, card.title, card.category, card.location
        );
        if card.posted_label.is_empty() {
            let _ = writeln!(out);
        } else {
            let _ = writeln!(out, " posted {}", card.posted_label);
        }
        if !card.summary.is_empty() {
            let _ = writeln!(out, "    {}", card.summary);
        }
    }
    out
}

pub(crate) fn render_job_detail(view: &JobDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", view.title, view.id);
    if let Some(company) = &view.company {
        let _ = writeln!(out, "{company}");
    }
    let _ = writeln!(out, "Location: {}", view.location);
    let _ = writeln!(out, "Category: {}", view.category);
    let _ = writeln!(out, "Job type: {}", view.job_type);
    let _ = writeln!(out, "Salary: {}", view.salary_range);
    let _ = writeln!(out, "Posted: {}", view.posted_label);
    let _ = writeln!(out, "Closing: {}", view.closing_label);

    if !view.description.is_empty() {
        let _ = writeln!(out, "\n{}", view.description);
    }
    for section in &view.sections {
        let _ = writeln!(out, "\n{}", section.heading);
        for item in &section.items {
            let _ = writeln!(out, "  - {item}");
        }
    }
    let _ = writeln!(out, "\nApply with: portal apply {}", view.id);
    out
}

pub(crate) fn render_attachment(attachment: &ResumeAttachment) -> String {
    format!(
        "Resume: {} ({})",
        attachment.file_name(),
        attachment.size_label()
    )
}

pub(crate) fn render_field_errors(err: &FormValidationError) -> String {
    let mut out = String::new();
    for error in &err.errors {
        let _ = writeln!(out, "  {}: {}", error.field.label(), error.message);
    }
    out
}

pub(crate) fn render_status_board(board: &StatusBoard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Application {}", board.application_id);
    if let Some(job_id) = &board.job_id {
        let _ = writeln!(out, "Job: {job_id}");
    }
    if let Some(submitted) = &board.submitted_label {
        let _ = writeln!(out, "Submitted: {submitted}");
    }
    if let Some(updated) = &board.updated_label {
        let _ = writeln!(out, "Last updated: {updated}");
    }
    if let Some(error) = board.error {
        let _ = writeln!(out, "! {error}");
    }

    for step in &board.steps {
        let marker = match step.state {
            StepState::Complete => "[x]",
            StepState::Active => "[>]",
            StepState::Pending => "[ ]",
        };
        let _ = writeln!(out, "  {marker} {}", step.label);
    }
    let _ = writeln!(out, "{}", board.message);
    out
}
