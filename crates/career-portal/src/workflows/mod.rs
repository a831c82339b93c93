pub mod applications;
pub mod jobs;
pub mod navigation;
pub mod tracking;
