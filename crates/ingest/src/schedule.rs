//! Periodic sync runner.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::feed::FeedSource;
use crate::sync::{run_full_sync, DrugSink, SyncOptions};

/// Run a full sync immediately and then every `every`, one run at a time,
/// until `cancel` is triggered. An in-flight run is dropped on cancellation;
/// rows already upserted stay.
///
/// Returns the number of completed runs.
pub async fn run_periodic<S, K>(
    source: &S,
    sink: &K,
    options: &SyncOptions,
    every: Duration,
    cancel: CancellationToken,
) -> u64
where
    S: FeedSource + ?Sized,
    K: DrugSink + ?Sized,
{
    tracing::info!(interval_secs = every.as_secs(), "Periodic drug sync started");

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut completed = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Periodic drug sync stopping");
                break;
            }
            _ = interval.tick() => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::info!("Periodic drug sync cancelled mid-run");
                        break;
                    }
                    report = run_full_sync(source, sink, options) => {
                        completed += 1;
                        if report.is_aborted() {
                            tracing::warn!(
                                run = completed,
                                "Drug sync run aborted; retrying next interval"
                            );
                        }
                    }
                }
            }
        }
    }

    completed
}
