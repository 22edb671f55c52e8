pub mod liveness_tracker;
