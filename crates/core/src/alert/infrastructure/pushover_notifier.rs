use std::env;
use std::time::Duration;

use crate::alert::domain::notifier::{Notifier, NotifyError};
use crate::shared::constants::{ALERT_TITLE, NOTIFY_TIMEOUT_SECS, PUSHOVER_ENDPOINT};

/// Pushover credentials and sound, sourced from the environment.
///
/// Empty values are allowed: the service rejects them and the send fails,
/// which the pipeline absorbs like any other notification error.
#[derive(Clone, Debug, Default)]
pub struct PushoverConfig {
    pub token: String,
    pub user: String,
    pub sound: String,
}

impl PushoverConfig {
    /// Reads `BODYWATCH_PUSHOVER_TOKEN`, `BODYWATCH_PUSHOVER_USER` and
    /// `BODYWATCH_PUSHOVER_SOUND`. Missing variables become empty strings.
    pub fn from_env() -> Self {
        Self {
            token: env::var("BODYWATCH_PUSHOVER_TOKEN").unwrap_or_default(),
            user: env::var("BODYWATCH_PUSHOVER_USER").unwrap_or_default(),
            sound: env::var("BODYWATCH_PUSHOVER_SOUND").unwrap_or_default(),
        }
    }
}

/// Sends push notifications via the Pushover message API.
///
/// One blocking, bounded-timeout POST per alert. No retries, no response
/// body parsing beyond the status code.
pub struct PushoverNotifier {
    client: reqwest::blocking::Client,
    endpoint: String,
    config: PushoverConfig,
}

impl PushoverNotifier {
    pub fn new(config: PushoverConfig) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: PUSHOVER_ENDPOINT.to_string(),
            config,
        })
    }

    /// Overrides the API endpoint (tests point this at a local listener).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn form_params(&self, message: &str) -> [(&'static str, String); 6] {
        [
            ("token", self.config.token.clone()),
            ("user", self.config.user.clone()),
            ("message", message.to_string()),
            ("title", ALERT_TITLE.to_string()),
            ("sound", self.config.sound.clone()),
            ("priority", "0".to_string()),
        ]
    }
}

impl Notifier for PushoverNotifier {
    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&self.form_params(message))
            .send()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PushoverConfig {
        PushoverConfig {
            token: "app-token".into(),
            user: "user-key".into(),
            sound: "siren".into(),
        }
    }

    #[test]
    fn test_form_params_carry_all_fields() {
        let notifier = PushoverNotifier::new(config()).unwrap();
        let params = notifier.form_params("Human detected by camera");

        let get = |k: &str| {
            params
                .iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("token"), "app-token");
        assert_eq!(get("user"), "user-key");
        assert_eq!(get("message"), "Human detected by camera");
        assert_eq!(get("title"), ALERT_TITLE);
        assert_eq!(get("sound"), "siren");
        assert_eq!(get("priority"), "0");
    }

    #[test]
    fn test_default_endpoint_is_pushover() {
        let notifier = PushoverNotifier::new(config()).unwrap();
        assert_eq!(notifier.endpoint, PUSHOVER_ENDPOINT);
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let notifier = PushoverNotifier::new(config())
            .unwrap()
            .with_endpoint("http://invalid.nonexistent.example.com/messages.json");
        let err = notifier.notify("hello").unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
    }

    #[test]
    fn test_empty_credentials_still_construct() {
        // Placeholder credentials must not fail at startup; they fail at
        // send time and the loop absorbs that.
        let notifier = PushoverNotifier::new(PushoverConfig::default()).unwrap();
        let params = notifier.form_params("msg");
        assert_eq!(params[0].1, "");
        assert_eq!(params[1].1, "");
    }

    #[test]
    fn test_config_from_env_reads_variables() {
        env::set_var("BODYWATCH_PUSHOVER_TOKEN", "t-env");
        env::set_var("BODYWATCH_PUSHOVER_USER", "u-env");
        env::set_var("BODYWATCH_PUSHOVER_SOUND", "s-env");

        let cfg = PushoverConfig::from_env();
        assert_eq!(cfg.token, "t-env");
        assert_eq!(cfg.user, "u-env");
        assert_eq!(cfg.sound, "s-env");

        env::remove_var("BODYWATCH_PUSHOVER_TOKEN");
        env::remove_var("BODYWATCH_PUSHOVER_USER");
        env::remove_var("BODYWATCH_PUSHOVER_SOUND");
    }
}
