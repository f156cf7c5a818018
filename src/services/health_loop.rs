//! Periodic self health-check for always-on deployments.
//!
//! Free hosting tiers put idle instances to sleep; pinging our own `/health`
//! over the public hostname keeps the process warm.

use crate::config::Settings;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{Instant, interval_at},
};
use tracing::{error, info, warn};

/// Interval between two self health-checks
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(9 * 60);

/// Whether the loop runs for a given deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthLoopState {
    /// Serverless host or personal deployment; the loop never starts
    Idle,
    /// Long-lived process with a public hostname
    Running,
}

impl HealthLoopState {
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.wants_health_loop() {
            HealthLoopState::Running
        } else {
            HealthLoopState::Idle
        }
    }
}

/// Issues the outbound health request
#[derive(Clone)]
pub struct HealthPinger {
    client: Client,
    url: String,
}

impl HealthPinger {
    /// Pinger for `https://<hostname>/health`
    pub fn for_hostname(hostname: &str) -> Result<Self, reqwest::Error> {
        Self::new(format!("https://{hostname}/health"))
    }

    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One health-check round trip
    pub async fn ping(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.get(&self.url).send().await?;
        Ok(response.status())
    }

    /// Logs the start of a tick, pings, and logs the outcome
    pub async fn tick(&self) {
        info!(
            url = %self.url,
            "aniwatch-api HEALTH_CHECK at {}",
            chrono::Utc::now().to_rfc3339()
        );

        match self.ping().await {
            Ok(status) if status.is_success() => {
                info!(status = status.as_u16(), "health check succeeded");
            }
            Ok(status) => {
                warn!(status = status.as_u16(), "health check returned non-success status");
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %message.trim(), "health check failed");
            }
        }
    }
}

/// Starts the loop when the settings call for it
///
/// The first check fires one full interval after startup. Failures are
/// logged and the next tick is the retry.
pub fn spawn_health_loop(settings: &Settings) -> Option<JoinHandle<()>> {
    if HealthLoopState::for_settings(settings) == HealthLoopState::Idle {
        return None;
    }

    let hostname = settings.hostname.as_deref()?;
    let pinger = match HealthPinger::for_hostname(hostname) {
        Ok(pinger) => pinger,
        Err(e) => {
            error!(error = %e, "could not build health check client; loop disabled");
            return None;
        }
    };

    info!(
        url = %pinger.url(),
        interval_secs = HEALTH_CHECK_INTERVAL.as_secs(),
        "starting health check loop"
    );

    Some(actix_web::rt::spawn(run_health_loop(
        pinger,
        HEALTH_CHECK_INTERVAL,
    )))
}

/// Ticks forever; ends only with the process
pub async fn run_health_loop(pinger: HealthPinger, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        pinger.tick().await;
    }
}
