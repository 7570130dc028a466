use crate::domain::error::DomainError;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::infrastructure::http::robots::RobotsRules;
use async_trait::async_trait;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

const ACCEPT: &str = "application/json,text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Above this multiple of the current delay a response counts as slow and
/// the host's delay is throttled upward.
const SLOW_FACTOR: u32 = 2;
const BACKOFF_FACTOR: f64 = 1.5;
const DECAY_FACTOR: f64 = 0.9;
const MAX_DELAY_MULTIPLE: u32 = 10;

#[derive(Debug)]
struct HostState {
    next_slot: Instant,
    delay: Duration,
    robots: Option<RobotsRules>,
}

/// The scheduler behind every outbound fetch: bounds total in-flight requests
/// with a semaphore, spaces requests per host by an adaptive minimum delay,
/// and refuses paths a host's robots.txt disallows.
pub struct ThrottledFetcher {
    client: reqwest::Client,
    permits: Semaphore,
    base_delay: Duration,
    max_delay: Duration,
    user_agent: String,
    hosts: Mutex<HashMap<String, HostState>>,
}

impl ThrottledFetcher {
    pub fn new(user_agent: &str, concurrency: usize, delay: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            permits: Semaphore::new(concurrency.max(1)),
            base_delay: delay,
            max_delay: delay * MAX_DELAY_MULTIPLE,
            user_agent: user_agent.to_string(),
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch robots.txt for a host the first time it is seen. A missing or
    /// unfetchable robots.txt means the host imposes no rules.
    async fn robots_for(&self, url: &Url) -> Result<RobotsRules, DomainError> {
        let host = url.host_str().unwrap_or_default().to_string();
        {
            let hosts = self.hosts.lock().map_err(|e| DomainError::Fetch(e.to_string()))?;
            if let Some(state) = hosts.get(&host) {
                if let Some(robots) = &state.robots {
                    return Ok(robots.clone());
                }
            }
        }

        let robots_url = format!("{}://{}/robots.txt", url.scheme(), host);
        let rules = match self.client.get(&robots_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                let body = resp.text().await.unwrap_or_default();
                RobotsRules::parse(&body, &self.user_agent)
            }
            _ => RobotsRules::allow_all(),
        };

        let mut hosts = self.hosts.lock().map_err(|e| DomainError::Fetch(e.to_string()))?;
        let state = hosts.entry(host).or_insert_with(|| HostState {
            next_slot: Instant::now(),
            delay: self.base_delay,
            robots: None,
        });
        state.robots = Some(rules.clone());
        Ok(rules)
    }

    /// Reserve the host's next request slot and return how long to wait for
    /// it. The slot is pushed forward by the host's current adaptive delay.
    fn reserve_slot(&self, host: &str) -> Result<Duration, DomainError> {
        let mut hosts = self.hosts.lock().map_err(|e| DomainError::Fetch(e.to_string()))?;
        let now = Instant::now();
        let state = hosts.entry(host.to_string()).or_insert_with(|| HostState {
            next_slot: now,
            delay: self.base_delay,
            robots: None,
        });
        let wait = state.next_slot.saturating_duration_since(now);
        let start = state.next_slot.max(now);
        state.next_slot = start + state.delay;
        Ok(wait)
    }

    /// Autothrottle: slow or failed responses push the host's delay up
    /// (capped), fast ones let it decay back toward the base.
    fn record_outcome(&self, host: &str, latency: Duration, ok: bool) {
        let Ok(mut hosts) = self.hosts.lock() else {
            return;
        };
        let Some(state) = hosts.get_mut(host) else {
            return;
        };
        if !ok || latency > state.delay * SLOW_FACTOR {
            state.delay = state.delay.mul_f64(BACKOFF_FACTOR).min(self.max_delay);
        } else {
            state.delay = state.delay.mul_f64(DECAY_FACTOR).max(self.base_delay);
        }
    }
}

#[async_trait]
impl PageFetcher for ThrottledFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let parsed =
            Url::parse(url).map_err(|e| DomainError::Fetch(format!("invalid URL {url}: {e}")))?;
        let host = parsed.host_str().unwrap_or_default().to_string();

        let robots = self.robots_for(&parsed).await?;
        if !robots.allows(parsed.path()) {
            return Err(DomainError::Fetch(format!(
                "robots.txt disallows {} on {host}",
                parsed.path()
            )));
        }

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;

        let wait = self.reserve_slot(&host)?;
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let started = Instant::now();
        let result = self
            .client
            .get(parsed.clone())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await;
        let latency = started.elapsed();

        match result {
            Ok(resp) if resp.status().is_success() => {
                self.record_outcome(&host, latency, true);
                resp.text()
                    .await
                    .map_err(|e| DomainError::Fetch(format!("body read failed for {url}: {e}")))
            }
            Ok(resp) => {
                self.record_outcome(&host, latency, false);
                Err(DomainError::Fetch(format!(
                    "{} returned {}",
                    url,
                    resp.status()
                )))
            }
            Err(e) => {
                self.record_outcome(&host, latency, false);
                Err(DomainError::Fetch(format!("{url}: {e}")))
            }
        }
    }
}
