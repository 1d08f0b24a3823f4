//! Page-view tracking entry point
//!
//! `track` validates its inputs, applies the do-not-track policy, builds
//! the parameter set and fires one beacon. It never fails loudly: input
//! errors are logged and swallowed, and suppression is a silent no-op.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::beacon::Beacon;
use crate::config::BootstrapConfig;
use crate::environment::{read_do_not_track, PageEnvironment};
use crate::error::TrackError;
use crate::identity::SessionStore;
use crate::models::{build_parameters, SiteId, TrackerOptions, UserOptions};
use crate::request::collector_url;

/// Result of a `try_track` call that passed input validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// A beacon was handed to the sender with this URL
    Sent(String),
    /// The user's do-not-track preference prevented tracking
    Suppressed,
}

pub struct Tracker {
    environment: Arc<dyn PageEnvironment>,
    session: Option<Arc<dyn SessionStore>>,
    beacon: Arc<dyn Beacon>,
}

impl Tracker {
    /// Tracker without a session store; every page view gets a fresh
    /// visitor id
    pub fn new(environment: Arc<dyn PageEnvironment>, beacon: Arc<dyn Beacon>) -> Self {
        Self {
            environment,
            session: None,
            beacon,
        }
    }

    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Track a page view, logging input errors instead of returning them
    pub fn track(&self, site_id: &Value, host: Option<&str>, options: &UserOptions) {
        match self.try_track(site_id, host, options) {
            Ok(TrackOutcome::Sent(url)) => debug!(url = %url, "Page view beacon sent"),
            Ok(TrackOutcome::Suppressed) => {}
            Err(e) => error!(error = %e, "Page view not tracked"),
        }
    }

    pub fn try_track(
        &self,
        site_id: &Value,
        host: Option<&str>,
        options: &UserOptions,
    ) -> Result<TrackOutcome, TrackError> {
        let site_id = SiteId::try_from(site_id)?;
        let host = host
            .filter(|host| !host.is_empty())
            .ok_or(TrackError::MissingHost)?;

        let options = TrackerOptions::resolve(options);

        let signal = read_do_not_track(self.environment.as_ref());
        if !signal.permits(options.strict_do_not_track) {
            return Ok(TrackOutcome::Suppressed);
        }

        let params = build_parameters(
            site_id,
            &options,
            self.environment.as_ref(),
            self.session.as_deref(),
        );
        let url = collector_url(host, &options, &params);

        self.beacon.send(&url);
        Ok(TrackOutcome::Sent(url))
    }
}

/// Track once with the page configuration, if there is one
pub fn bootstrap(config: Option<&BootstrapConfig>, tracker: &Tracker) {
    let Some(config) = config else {
        debug!("No page configuration, nothing to track");
        return;
    };

    let options = config.options.clone().unwrap_or_default();
    tracker.track(&config.id, config.host.as_deref(), &options);
}
