//! Application status tracking: the code-to-progress mapping, the recurring
//! poller, and the status board view model.

pub mod poller;
pub mod progress;
pub mod views;

pub use poller::{StatusPoller, StatusSnapshot, StatusWatch, STATUS_LOAD_FAILED};
pub use progress::{progress_step, status_message, ProgressStep};
pub use views::{StatusBoard, StepState, StepView, STATUS_LOADING_MESSAGE};
