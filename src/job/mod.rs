//! Single-flight crawl job orchestration
//!
//! [`CrawlJob`] owns the shared job state and is its only writer. A trigger
//! performs the guard-check-then-set under one mutex acquisition, spawns the
//! pipeline as a background task, and returns immediately; callers poll
//! [`CrawlJob::status`] to observe completion. Exactly one run can be in
//! flight; a second trigger fails with [`HarvestError::Conflict`] without
//! touching any state.
//!
//! On success the snapshot is written, reloaded through the dataset loader,
//! and swapped into the serving store. On any fatal failure the store keeps
//! serving the previous dataset and the error text is recorded instead. The
//! spawned task never propagates an error past the orchestrator.

use crate::config::Config;
use crate::crawler::{build_http_client, harvest};
use crate::dataset::{load_snapshot, write_snapshot, CatalogStore};
use crate::{HarvestError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Observable state of the crawl job
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JobStatus {
    /// True only while a harvest is in flight
    pub running: bool,

    /// Path of the most recently written snapshot, if any run has succeeded
    pub last_success_path: Option<String>,

    /// Message of the most recent failure; cleared when a new run starts
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct JobState {
    running: bool,
    last_success_path: Option<String>,
    last_error: Option<String>,
    started_at: Option<DateTime<Utc>>,
}

struct JobInner {
    config: Config,
    client: Client,
    store: CatalogStore,
    state: Mutex<JobState>,
}

/// Singleton background-job handle for the harvest pipeline
#[derive(Clone)]
pub struct CrawlJob {
    inner: Arc<JobInner>,
}

impl CrawlJob {
    /// Creates the job orchestrator
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `store` - The serving store to swap on success
    pub fn new(config: Config, store: CatalogStore) -> Result<Self> {
        let client = build_http_client(&config)?;

        Ok(Self {
            inner: Arc::new(JobInner {
                config,
                client,
                store,
                state: Mutex::new(JobState::default()),
            }),
        })
    }

    /// Schedules one harvest run
    ///
    /// Returns as soon as the run is scheduled; the pipeline executes on a
    /// spawned task. Must be called from within a tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The run was scheduled
    /// * `Err(HarvestError::Conflict)` - A run is already in flight; no
    ///   state was changed
    pub fn trigger(&self) -> Result<()> {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.running {
                return Err(HarvestError::Conflict);
            }
            state.running = true;
            state.last_error = None;
            state.started_at = Some(Utc::now());
        }

        tracing::info!("Harvest job scheduled");
        let inner = self.inner.clone();
        tokio::spawn(async move {
            run_job(inner).await;
        });

        Ok(())
    }

    /// Reads the current job state without blocking on the pipeline
    pub fn status(&self) -> JobStatus {
        let state = self.inner.state.lock().unwrap();
        JobStatus {
            running: state.running,
            last_success_path: state.last_success_path.clone(),
            last_error: state.last_error.clone(),
        }
    }
}

/// Executes one run and records its terminal outcome
///
/// `running` returns to false on every path out of this function.
async fn run_job(inner: Arc<JobInner>) {
    let deadline = Duration::from_secs(inner.config.crawler.job_deadline_secs);
    let result = match tokio::time::timeout(deadline, run_pipeline(&inner)).await {
        Ok(result) => result,
        Err(_) => Err(HarvestError::Deadline(deadline)),
    };

    let mut state = inner.state.lock().unwrap();
    let elapsed = state
        .started_at
        .map(|started| Utc::now() - started)
        .and_then(|d| d.to_std().ok());

    match result {
        Ok(path) => {
            tracing::info!("Harvest succeeded in {:?}: {}", elapsed, path);
            state.last_success_path = Some(path);
        }
        Err(e) => {
            tracing::error!("Harvest failed after {:?}: {}", elapsed, e);
            state.last_error = Some(e.to_string());
        }
    }
    state.running = false;
}

/// Crawl, persist, reload, and swap the serving copy
async fn run_pipeline(inner: &JobInner) -> Result<String> {
    let outcome = harvest(&inner.client, &inner.config).await?;

    let snapshot_path = Path::new(&inner.config.output.snapshot_path);
    let written = write_snapshot(&outcome.records, snapshot_path)?;

    let records = load_snapshot(&written)?;
    inner.store.swap(records);

    Ok(written.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};

    fn test_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "http://127.0.0.1:9/".to_string(),
            },
            crawler: CrawlerConfig {
                listing_concurrency: 2,
                detail_concurrency: 2,
                fetch_timeout_secs: 1,
                job_deadline_secs: 5,
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestHarvester".to_string(),
                crawler_version: "1.0".to_string(),
            },
            output: OutputConfig {
                snapshot_path: "/tmp/shelf-harvest-job-test.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_initial_status_is_idle() {
        let job = CrawlJob::new(test_config(), CatalogStore::new()).unwrap();
        let status = job.status();

        assert!(!status.running);
        assert!(status.last_success_path.is_none());
        assert!(status.last_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_discovery_records_error_and_returns_to_idle() {
        // Port 9 (discard) refuses connections; discovery is the fatal step
        let store = CatalogStore::new();
        let job = CrawlJob::new(test_config(), store.clone()).unwrap();

        job.trigger().unwrap();
        while job.status().running {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let status = job.status();
        assert!(!status.running);
        assert!(status.last_error.is_some());
        assert!(status.last_success_path.is_none());
        assert!(store.is_empty());
    }
}
