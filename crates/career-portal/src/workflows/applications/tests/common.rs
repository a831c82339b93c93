use crate::workflows::applications::{ApplicationForm, FormField, ResumeFile};
use crate::workflows::jobs::JobId;

pub(super) const MIB: usize = 1024 * 1024;

pub(super) fn job_id() -> JobId {
    JobId::from("JOB-42")
}

pub(super) fn pdf(name: &str) -> ResumeFile {
    ResumeFile::new(name, b"%PDF-1.7 sample".to_vec())
}

/// Form with every required field filled but no résumé attached.
pub(super) fn filled_form() -> ApplicationForm {
    let mut form = ApplicationForm::new(job_id());
    form.set_field(FormField::FullName, "Ada Lovelace");
    form.set_field(FormField::Email, "ada@example.com");
    form.set_field(FormField::Phone, "+1 (555) 123-4567");
    form.set_field(FormField::CoverLetter, "Analytical engines are my passion.");
    form
}

pub(super) fn ready_form() -> ApplicationForm {
    let mut form = filled_form();
    form.attach_file(pdf("ada-lovelace.pdf"))
        .expect("pdf résumé accepted");
    form
}
