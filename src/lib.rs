pub mod beacon;
pub mod config;
pub mod environment;
pub mod error;
pub mod identity;
pub mod models;
pub mod request;
pub mod tracker;

pub use error::{BeaconError, TrackError};
pub use tracker::{bootstrap, TrackOutcome, Tracker};
