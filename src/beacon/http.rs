//! HTTP beacon backed by a background dispatcher task
//!
//! `send` only enqueues. The dispatcher owns the HTTP client, issues each
//! GET and throws the response away. When every `HttpBeacon` handle is
//! dropped the dispatcher drains what is left in the queue and exits.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::Beacon;
use crate::config::DispatchConfig;
use crate::error::BeaconError;

/// Handle for queueing beacons. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpBeacon {
    tx: mpsc::Sender<String>,
}

struct Dispatcher {
    rx: mpsc::Receiver<String>,
    client: reqwest::Client,
}

impl HttpBeacon {
    /// Start the dispatcher on the current tokio runtime
    ///
    /// The returned `JoinHandle` completes once all handles are dropped
    /// and the queue is drained. Callers that exit soon after tracking
    /// can await it to give in-flight beacons a chance to leave.
    pub fn spawn(config: &DispatchConfig) -> Result<(Self, JoinHandle<()>), BeaconError> {
        let runtime = Handle::try_current().map_err(|_| BeaconError::NoRuntime)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let (tx, rx) = mpsc::channel(config.queue_size.max(1));
        let dispatcher = Dispatcher { rx, client };
        let task = runtime.spawn(dispatcher.run());

        Ok((Self { tx }, task))
    }
}

impl Beacon for HttpBeacon {
    fn send(&self, url: &str) {
        // Never block the caller; a full queue drops the beacon
        if let Err(e) = self.tx.try_send(url.to_string()) {
            trace!(error = %e, "beacon dropped before dispatch");
        }
    }
}

impl Dispatcher {
    async fn run(mut self) {
        while let Some(url) = self.rx.recv().await {
            match self.client.get(&url).send().await {
                Ok(response) => trace!(status = %response.status(), "beacon delivered"),
                Err(e) => debug!(error = %e, "beacon lost"),
            }
        }
        debug!("Beacon dispatcher stopped");
    }
}
