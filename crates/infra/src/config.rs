use chrono_tz::Tz;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. In-memory repositories are used when absent.
    pub database_url: Option<String>,
    /// Timezone in which `Session` dates and times are interpreted
    pub timezone: Tz,
    /// Seconds between two notification sweeps
    pub sweep_interval_secs: u64,
    /// An occurrence starting within this many minutes from now is
    /// considered imminent and its participants are notified.
    pub notification_lead_minutes: i64,
    /// `NotificationRecord`s older than this many days are purged
    pub notification_retention_days: i64,
    /// Seconds between two runs of the retention job
    pub retention_interval_secs: u64,
    /// Notifications are posted here when set, otherwise they are logged
    pub notification_webhook_url: Option<String>,
    /// Maximum number of days ahead allowed when querying upcoming sessions.
    /// This is used to avoid having clients ask for upcoming sessions several
    /// years ahead which is not very useful information anyways.
    pub upcoming_lookahead_days_limit: i64,
}

/// Reads `key` from the environment, falling back to `default` when it is
/// missing or cannot be parsed.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn new() -> Self {
        let timezone = match std::env::var("SCHEDULER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given SCHEDULER_TIMEZONE: {} is not a valid IANA timezone, falling back to UTC.",
                        tz
                    );
                    chrono_tz::UTC
                }
            },
            Err(_) => chrono_tz::UTC,
        };

        let notification_webhook_url = optional_env("NOTIFICATION_WEBHOOK_URL");
        if notification_webhook_url.is_none() {
            info!("Did not find NOTIFICATION_WEBHOOK_URL environment variable. Notifications will only be logged.");
        }

        Self {
            database_url: optional_env("DATABASE_URL"),
            timezone,
            sweep_interval_secs: parse_env("NOTIFICATION_SWEEP_INTERVAL_SECS", 5 * 60),
            notification_lead_minutes: parse_env("NOTIFICATION_LEAD_MINUTES", 60),
            notification_retention_days: parse_env("NOTIFICATION_RETENTION_DAYS", 7),
            retention_interval_secs: parse_env("NOTIFICATION_RETENTION_INTERVAL_SECS", 60 * 60 * 24),
            notification_webhook_url,
            upcoming_lookahead_days_limit: parse_env("UPCOMING_LOOKAHEAD_DAYS_LIMIT", 62),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_to_default() {
        std::env::set_var("TUTOR_SCHEDULER_TEST_INVALID", "five");
        assert_eq!(parse_env("TUTOR_SCHEDULER_TEST_INVALID", 5_u64), 5);
        std::env::set_var("TUTOR_SCHEDULER_TEST_VALID", "42");
        assert_eq!(parse_env("TUTOR_SCHEDULER_TEST_VALID", 5_u64), 42);
        assert_eq!(parse_env("TUTOR_SCHEDULER_TEST_MISSING", 7_i64), 7);
    }

    #[test]
    fn optional_env_ignores_blank_values() {
        std::env::set_var("TUTOR_SCHEDULER_TEST_BLANK", "  ");
        assert_eq!(optional_env("TUTOR_SCHEDULER_TEST_BLANK"), None);
        std::env::set_var("TUTOR_SCHEDULER_TEST_URL", "http://localhost:9000");
        assert_eq!(
            optional_env("TUTOR_SCHEDULER_TEST_URL"),
            Some("http://localhost:9000".to_string())
        );
    }
}
