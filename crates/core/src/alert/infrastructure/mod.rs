pub mod pushover_notifier;
pub mod threaded_notifier;
