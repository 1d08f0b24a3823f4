//! Read-only view of the page being tracked
//!
//! Production code binds [`PageEnvironment`] to whatever hosts the page;
//! [`StaticPage`] binds it to fixed values.

pub mod consent;

pub use consent::{read_do_not_track, ConsentSignal};

use reqwest::Url;

/// Environment reads needed to describe one page view
pub trait PageEnvironment: Send + Sync {
    /// Full address of the current page, fragment included
    fn current_url(&self) -> Url;

    /// Text of the first title element, `None` when the page has none
    fn current_title(&self) -> Option<String>;

    /// Referring document, `None` or empty when there isn't one
    fn referrer(&self) -> Option<String>;

    /// Raw do-not-track preference, `None` when the source is absent
    fn do_not_track(&self) -> Option<String>;

    /// Raw do-not-track preference from the legacy vendor source
    ///
    /// Only consulted when [`PageEnvironment::do_not_track`] is absent.
    fn legacy_do_not_track(&self) -> Option<String> {
        None
    }
}

/// Page environment with fixed values
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: Url,
    title: Option<String>,
    referrer: Option<String>,
    do_not_track: Option<String>,
    legacy_do_not_track: Option<String>,
}

impl StaticPage {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: None,
            referrer: None,
            do_not_track: None,
            legacy_do_not_track: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn with_do_not_track(mut self, value: impl Into<String>) -> Self {
        self.do_not_track = Some(value.into());
        self
    }

    pub fn with_legacy_do_not_track(mut self, value: impl Into<String>) -> Self {
        self.legacy_do_not_track = Some(value.into());
        self
    }
}

impl PageEnvironment for StaticPage {
    fn current_url(&self) -> Url {
        self.url.clone()
    }

    fn current_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }

    fn do_not_track(&self) -> Option<String> {
        self.do_not_track.clone()
    }

    fn legacy_do_not_track(&self) -> Option<String> {
        self.legacy_do_not_track.clone()
    }
}
