//! The paging ingest loop.
//!
//! Pages are fetched sequentially starting at 1. Every usable item is
//! upserted on its own, and a page shorter than the page size ends the run.
//! Upstream failures are retried with exponential backoff; once the retry
//! budget is spent the run stops with [`SyncOutcome::Aborted`].

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use yakbot_db::models::drug::UpsertDrug;
use yakbot_db::repositories::DrugRepo;

use crate::feed::{FeedError, FeedPage, FeedSource};

/// Destination of mapped feed items.
#[async_trait]
pub trait DrugSink: Send + Sync {
    async fn upsert(&self, drug: &UpsertDrug) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl DrugSink for PgPool {
    async fn upsert(&self, drug: &UpsertDrug) -> Result<(), sqlx::Error> {
        DrugRepo::upsert(self, drug).await.map(|_| ())
    }
}

/// Tuning knobs for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub page_size: u32,
    /// Pause between two successful page fetches.
    pub page_delay: Duration,
    /// Attempts per page, including the first one.
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles for each further attempt.
    pub retry_backoff: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            page_delay: Duration::from_secs(1),
            max_attempts: 3,
            retry_backoff: Duration::from_secs(2),
        }
    }
}

/// How a sync run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A short or empty page was reached.
    Exhausted,
    /// `page` could not be fetched within the retry budget.
    Aborted { page: u32, error: String },
}

/// Counters for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Pages fetched successfully.
    pub pages: u32,
    /// Items received across those pages.
    pub fetched: u64,
    pub upserted: u64,
    /// Items without an item code or name.
    pub skipped: u64,
    /// Items the sink rejected.
    pub failed: u64,
    pub outcome: SyncOutcome,
}

impl SyncReport {
    fn new() -> Self {
        Self {
            pages: 0,
            fetched: 0,
            upserted: 0,
            skipped: 0,
            failed: 0,
            outcome: SyncOutcome::Exhausted,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Aborted { .. })
    }
}

/// Run a full sync from page 1 until the feed is exhausted or a page fails
/// for good.
pub async fn run_full_sync<S, K>(source: &S, sink: &K, options: &SyncOptions) -> SyncReport
where
    S: FeedSource + ?Sized,
    K: DrugSink + ?Sized,
{
    let mut report = SyncReport::new();
    let mut page_no: u32 = 1;

    tracing::info!(page_size = options.page_size, "Drug sync started");

    loop {
        let page = match fetch_with_retry(source, page_no, options).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(page = page_no, error = %e, "Drug sync aborted");
                report.outcome = SyncOutcome::Aborted {
                    page: page_no,
                    error: e.to_string(),
                };
                return report;
            }
        };

        let received = page.items.len();
        report.pages += 1;
        report.fetched += received as u64;

        for item in &page.items {
            let Some(drug) = item.to_upsert() else {
                tracing::warn!(
                    page = page_no,
                    item_seq = ?item.item_seq,
                    "Skipping feed item without item code or name"
                );
                report.skipped += 1;
                continue;
            };
            match sink.upsert(&drug).await {
                Ok(()) => report.upserted += 1,
                Err(e) => {
                    tracing::error!(
                        page = page_no,
                        drug_id = %drug.id,
                        error = %e,
                        "Drug upsert failed"
                    );
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            page = page_no,
            received,
            total = ?page.total_count,
            "Drug page processed"
        );

        if received < options.page_size as usize {
            break;
        }

        page_no += 1;
        tokio::time::sleep(options.page_delay).await;
    }

    tracing::info!(
        pages = report.pages,
        fetched = report.fetched,
        upserted = report.upserted,
        skipped = report.skipped,
        failed = report.failed,
        "Drug sync finished"
    );
    report
}

async fn fetch_with_retry<S>(
    source: &S,
    page_no: u32,
    options: &SyncOptions,
) -> Result<FeedPage, FeedError>
where
    S: FeedSource + ?Sized,
{
    let mut attempt: u32 = 1;
    loop {
        match source.fetch_page(page_no, options.page_size).await {
            Ok(page) => return Ok(page),
            Err(e) if attempt >= options.max_attempts => return Err(e),
            Err(e) => {
                let wait = options.retry_backoff * 2u32.saturating_pow(attempt - 1);
                tracing::warn!(
                    page = page_no,
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    error = %e,
                    "Feed request failed, retrying"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
        }
    }
}
