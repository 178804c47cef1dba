use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::templates::SenderProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required email credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => log::warn!("failed to load .env file: {}", err),
    }
}

/// Log file named by `CAMPAIGN_LOG_FILE`, `email_campaign.log` when unset.
/// An empty value disables file logging.
pub fn log_file_from_env() -> Option<PathBuf> {
    match env::var("CAMPAIGN_LOG_FILE") {
        Ok(value) if value.trim().is_empty() => None,
        Ok(value) => Some(PathBuf::from(value.trim())),
        Err(_) => Some(PathBuf::from("email_campaign.log")),
    }
}

/// Campaign settings loaded once from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sender: SenderProfile,
    pub booking_link: String,
    pub send_delay: Duration,
    pub dry_run_delay: Duration,
    pub max_emails_per_day: usize,
    pub tracking_file: PathBuf,
    pub campaign_batch: String,
    pub template_version: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let sender = SenderProfile {
            name: env_string("EMAIL_FROM_NAME", "Hamza Mhirsi"),
            title: env_string("SENDER_TITLE", "CEO & Founder"),
            company: env_string("SENDER_COMPANY", "Wraki"),
            website: env_string("SENDER_WEBSITE", "https://wraki.ma"),
        };

        Ok(Self {
            sender,
            booking_link: env_string("BOOKING_LINK", "https://calendly.com/your-booking-link"),
            send_delay: Duration::from_secs(env_parsed("DELAY_BETWEEN_EMAILS", 5u64)?),
            dry_run_delay: Duration::from_secs(env_parsed("DRY_RUN_DELAY", 1u64)?),
            max_emails_per_day: env_parsed("MAX_EMAILS_PER_DAY", 50usize)?,
            tracking_file: PathBuf::from(env_string("TRACKING_FILE", "campaign_tracking.csv")),
            campaign_batch: env_string("CAMPAIGN_BATCH", "BATCH_001"),
            template_version: env_string("TEMPLATE_VERSION", "1.0"),
        })
    }

    /// Delay between consecutive sends for the given mode.
    pub fn delay_for(&self, dry_run: bool) -> Duration {
        if dry_run {
            self.dry_run_delay
        } else {
            self.send_delay
        }
    }

    /// Resolve the per-invocation send limit, clamped to the daily cap.
    pub fn batch_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(max) if max > self.max_emails_per_day => {
                log::warn!(
                    "requested {} sends exceeds the daily cap of {}; clamping",
                    max,
                    self.max_emails_per_day
                );
                self.max_emails_per_day
            }
            Some(max) => max,
            None => self.max_emails_per_day,
        }
    }
}

/// SMTP relay credentials. Only required for live sends.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
    pub from_email: String,
}

impl SmtpSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = env_optional("EMAIL_USER");
        let password = env_optional("EMAIL_PASSWORD");
        let from_email = env_optional("EMAIL_FROM_EMAIL");

        let missing: Vec<&'static str> = [
            ("EMAIL_USER", username.is_none()),
            ("EMAIL_PASSWORD", password.is_none()),
            ("EMAIL_FROM_EMAIL", from_email.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        match (username, password, from_email) {
            (Some(username), Some(password), Some(from_email)) => Ok(Self {
                host: env_string("EMAIL_HOST", "smtp.gmail.com"),
                port: env_parsed("EMAIL_PORT", 587u16)?,
                username,
                password,
                from_name: env_string("EMAIL_FROM_NAME", "Hamza Mhirsi"),
                from_email,
            }),
            _ => Err(ConfigError::MissingCredentials(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(cap: usize) -> Settings {
        Settings {
            sender: SenderProfile {
                name: "A".into(),
                title: "B".into(),
                company: "C".into(),
                website: "D".into(),
            },
            booking_link: String::new(),
            send_delay: Duration::from_secs(5),
            dry_run_delay: Duration::from_secs(1),
            max_emails_per_day: cap,
            tracking_file: PathBuf::from("tracking.csv"),
            campaign_batch: "BATCH_001".into(),
            template_version: "1.0".into(),
        }
    }

    #[test]
    fn batch_limit_defaults_to_and_clamps_at_daily_cap() {
        let settings = settings(50);
        assert_eq!(settings.batch_limit(None), 50);
        assert_eq!(settings.batch_limit(Some(10)), 10);
        assert_eq!(settings.batch_limit(Some(500)), 50);
    }

    #[test]
    fn delay_depends_on_mode() {
        let settings = settings(50);
        assert_eq!(settings.delay_for(true), Duration::from_secs(1));
        assert_eq!(settings.delay_for(false), Duration::from_secs(5));
    }
}
