//! Do-not-track evaluation

use super::PageEnvironment;

/// User's tracking preference, normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentSignal {
    /// Do-not-track explicitly on (`"yes"` or `"1"`)
    On,
    /// Do-not-track explicitly off (`"no"` or `"0"`)
    Off,
    /// No preference found, or a value we don't recognize
    Unspecified,
}

impl ConsentSignal {
    pub fn from_raw(value: Option<&str>) -> Self {
        match value {
            Some("yes" | "1") => Self::On,
            Some("no" | "0") => Self::Off,
            _ => Self::Unspecified,
        }
    }

    /// Whether a page view may be recorded under this signal
    ///
    /// Strict mode treats an unspecified preference as do-not-track.
    /// Lenient mode tracks unless the user explicitly opted out.
    pub fn permits(self, strict: bool) -> bool {
        match self {
            Self::On => false,
            Self::Off => true,
            Self::Unspecified => !strict,
        }
    }
}

/// Read the first present preference source and normalize it
///
/// A present primary source wins even if its value is unrecognized.
pub fn read_do_not_track(env: &dyn PageEnvironment) -> ConsentSignal {
    let raw = env.do_not_track().or_else(|| env.legacy_do_not_track());
    ConsentSignal::from_raw(raw.as_deref())
}
