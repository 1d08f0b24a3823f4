//! One-way beacon dispatch
//!
//! A beacon is fired and forgotten: nothing is returned to the caller,
//! nothing is retried, and a lost request is simply lost.

mod capture;
mod http;

pub use capture::CapturingBeacon;
pub use http::HttpBeacon;

/// Sends a collector URL as a one-way GET
pub trait Beacon: Send + Sync {
    /// Queue `url` for delivery without waiting on the network
    fn send(&self, url: &str);
}
