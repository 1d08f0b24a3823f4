use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::models::UserOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page configuration to track with, if any was provided
    pub bootstrap: Option<BootstrapConfig>,
    pub dispatch: DispatchConfig,
}

/// Page configuration that triggers one `track()` call
///
/// Mirrors the JSON object a page embeds:
/// `{"id": 3, "host": "collector.example.com", "options": {"useHttps": false}}`.
/// `id` is kept untyped so that invalid values reach `track()` and are
/// reported there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub options: Option<UserOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-request HTTP timeout
    #[serde(default = "DispatchConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Beacons queued beyond this are dropped
    #[serde(default = "DispatchConfig::default_queue_size")]
    pub queue_size: usize,
    #[serde(default = "DispatchConfig::default_user_agent")]
    pub user_agent: String,
}

impl DispatchConfig {
    const fn default_timeout_secs() -> u64 {
        10
    }

    const fn default_queue_size() -> usize {
        64
    }

    fn default_user_agent() -> String {
        format!("beacon/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            queue_size: Self::default_queue_size(),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl BootstrapConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid bootstrap configuration JSON")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json)
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let site_id = var("BEACON_SITE_ID");
        let host = var("BEACON_HOST");

        let bootstrap = if site_id.is_some() || host.is_some() {
            Some(BootstrapConfig {
                id: site_id.map(site_id_value).unwrap_or(Value::Null),
                host,
                options: Some(UserOptions {
                    use_https: flag(&var, "BEACON_USE_HTTPS"),
                    send_referrer: flag(&var, "BEACON_SEND_REFERRER"),
                    strict_do_not_track: flag(&var, "BEACON_STRICT_DO_NOT_TRACK"),
                }),
            })
        } else {
            None
        };

        let timeout_secs = match var("BEACON_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("BEACON_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DispatchConfig::default_timeout_secs(),
        };
        let queue_size = match var("BEACON_QUEUE_SIZE") {
            Some(v) => v
                .parse::<usize>()
                .context("BEACON_QUEUE_SIZE must be a positive integer")?,
            None => DispatchConfig::default_queue_size(),
        };
        let user_agent =
            var("BEACON_USER_AGENT").unwrap_or_else(DispatchConfig::default_user_agent);

        Ok(Config {
            bootstrap,
            dispatch: DispatchConfig {
                timeout_secs,
                queue_size,
                user_agent,
            },
        })
    }
}

/// Numbers become JSON numbers, anything else stays a string and is
/// rejected later by site id validation
fn site_id_value(raw: String) -> Value {
    match raw.trim().parse::<i64>() {
        Ok(id) => Value::from(id),
        Err(_) => Value::String(raw),
    }
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = var(key)?;
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        other => {
            tracing::warn!("Unknown value '{other}' for {key}, using the default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert!(config.bootstrap.is_none());
        assert_eq!(config.dispatch.timeout_secs, 10);
        assert_eq!(config.dispatch.queue_size, 64);
        assert!(config.dispatch.user_agent.starts_with("beacon/"));
    }

    #[test]
    fn test_bootstrap_from_variables() {
        let config = Config::from_vars(vars(&[
            ("BEACON_SITE_ID", "3"),
            ("BEACON_HOST", "collector.example.com"),
            ("BEACON_USE_HTTPS", "false"),
            ("BEACON_STRICT_DO_NOT_TRACK", "YES"),
        ]))
        .unwrap();

        let bootstrap = config.bootstrap.unwrap();
        assert_eq!(bootstrap.id, json!(3));
        assert_eq!(bootstrap.host.as_deref(), Some("collector.example.com"));
        assert_eq!(
            bootstrap.options,
            Some(UserOptions {
                use_https: Some(false),
                send_referrer: None,
                strict_do_not_track: Some(true),
            })
        );
    }

    #[test]
    fn test_non_numeric_site_id_kept_as_string() {
        let config = Config::from_vars(vars(&[("BEACON_SITE_ID", "abc")])).unwrap();
        let bootstrap = config.bootstrap.unwrap();

        assert_eq!(bootstrap.id, json!("abc"));
        assert_eq!(bootstrap.host, None);
    }

    #[test]
    fn test_unknown_flag_falls_back_to_default() {
        let config = Config::from_vars(vars(&[
            ("BEACON_HOST", "c.example"),
            ("BEACON_SEND_REFERRER", "sometimes"),
        ]))
        .unwrap();

        let options = config.bootstrap.unwrap().options.unwrap();
        assert_eq!(options.send_referrer, None);
    }

    #[test]
    fn test_invalid_timeout_is_an_error() {
        assert!(Config::from_vars(vars(&[("BEACON_TIMEOUT_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_bootstrap_from_json() {
        let bootstrap = BootstrapConfig::from_json(
            r#"{"id": 3, "host": "collector.example.com", "options": {"useHttps": false, "extra": 1}, "version": 2}"#,
        )
        .unwrap();

        assert_eq!(bootstrap.id, json!(3));
        assert_eq!(bootstrap.host.as_deref(), Some("collector.example.com"));
        assert_eq!(bootstrap.options.unwrap().use_https, Some(false));
    }

    #[test]
    fn test_bootstrap_from_json_missing_fields() {
        let bootstrap = BootstrapConfig::from_json("{}").unwrap();

        assert_eq!(bootstrap.id, Value::Null);
        assert_eq!(bootstrap.host, None);
        assert_eq!(bootstrap.options, None);
    }

    #[test]
    fn test_bootstrap_from_invalid_json() {
        assert!(BootstrapConfig::from_json("{id: 3").is_err());
    }
}
