pub mod alert_channel;
pub mod alert_dispatcher;
pub mod alert_log;
pub mod alert_profile;
pub mod tone_player;
pub mod tone_sink;
