pub mod driver_monitor;
pub mod monitor_logger;
pub mod monitor_use_case;
