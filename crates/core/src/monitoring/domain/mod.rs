pub mod presence_classifier;
pub mod status;
pub mod status_banner;
pub mod status_machine;
