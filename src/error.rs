use thiserror::Error;

/// Input errors that stop a page view from being tracked
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("site id {0} is not a valid integer")]
    InvalidSiteId(String),
    #[error("no collector host was provided")]
    MissingHost,
}

#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("beacon dispatcher must be started inside a tokio runtime")]
    NoRuntime,
    #[error("failed to build HTTP client for beacons")]
    Client(#[from] reqwest::Error),
}
