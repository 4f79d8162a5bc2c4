pub mod watch_logger;
pub mod watch_use_case;
