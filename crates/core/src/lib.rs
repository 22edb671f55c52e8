pub mod alerting;
pub mod liveness;
pub mod monitoring;
pub mod pipeline;
pub mod sensing;
pub mod shared;
