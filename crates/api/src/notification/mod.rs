pub mod purge_notification_records;
pub mod run_notification_sweep;
