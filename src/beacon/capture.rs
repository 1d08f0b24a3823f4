use std::sync::Mutex;

use super::Beacon;

/// Beacon that records URLs instead of sending them
///
/// Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct CapturingBeacon {
    urls: Mutex<Vec<String>>,
}

impl CapturingBeacon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL sent so far, oldest first
    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.urls().pop()
    }

    pub fn len(&self) -> usize {
        self.urls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Beacon for CapturingBeacon {
    fn send(&self, url: &str) {
        self.urls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
    }
}
