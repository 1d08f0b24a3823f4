use serde::{Deserialize, Serialize};

/// Resolved options for one `track()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerOptions {
    /// Send beacons over https instead of http
    pub use_https: bool,
    /// Include the referring document as `urlref`
    pub send_referrer: bool,
    /// Only track when the user explicitly turned do-not-track off
    pub strict_do_not_track: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            use_https: true,
            send_referrer: true,
            strict_do_not_track: false,
        }
    }
}

/// Caller supplied options, any of which may be left out
///
/// Deserializes from the camelCase form used in page configuration
/// (`{"useHttps": false}`). Unrecognized keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOptions {
    pub use_https: Option<bool>,
    pub send_referrer: Option<bool>,
    pub strict_do_not_track: Option<bool>,
}

impl TrackerOptions {
    /// Merge caller options over the defaults
    pub fn resolve(user: &UserOptions) -> Self {
        let defaults = Self::default();
        Self {
            use_https: user.use_https.unwrap_or(defaults.use_https),
            send_referrer: user.send_referrer.unwrap_or(defaults.send_referrer),
            strict_do_not_track: user
                .strict_do_not_track
                .unwrap_or(defaults.strict_do_not_track),
        }
    }
}

pub fn create_options(user: &UserOptions) -> TrackerOptions {
    TrackerOptions::resolve(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_are_defaults() {
        let options = create_options(&UserOptions::default());
        assert_eq!(
            options,
            TrackerOptions {
                use_https: true,
                send_referrer: true,
                strict_do_not_track: false,
            }
        );
    }

    #[test]
    fn test_override_single_field() {
        let options = create_options(&UserOptions {
            send_referrer: Some(false),
            ..Default::default()
        });

        assert!(options.use_https);
        assert!(!options.send_referrer);
        assert!(!options.strict_do_not_track);
    }

    #[test]
    fn test_override_all_fields() {
        let options = create_options(&UserOptions {
            use_https: Some(false),
            send_referrer: Some(false),
            strict_do_not_track: Some(true),
        });

        assert_eq!(
            options,
            TrackerOptions {
                use_https: false,
                send_referrer: false,
                strict_do_not_track: true,
            }
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let user: UserOptions =
            serde_json::from_str(r#"{"useHttps": false, "trackClicks": true, "foo": 1}"#)
                .unwrap();

        assert_eq!(
            user,
            UserOptions {
                use_https: Some(false),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_deserialize_partial_then_resolve() {
        let user: UserOptions = serde_json::from_str(r#"{"strictDoNotTrack": true}"#).unwrap();
        let options = TrackerOptions::resolve(&user);

        assert!(options.use_https);
        assert!(options.send_referrer);
        assert!(options.strict_do_not_track);
    }
}
