// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live follow loop shared by `strand run --follow` and `strand job follow`.
//!
//! One event channel, three consumers: the job tracker drives the loop and
//! decides the exit status, while screen output and result datasets stream
//! from side tasks. Output deltas go to stdout verbatim; everything else is
//! prefixed with `* `.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use strand_client::RestClient;
use strand_core::{JobId, JobRecord, SessionId};
use strand_watch::{DatasetWatcher, EventChannel, JobTracker, OutputWatcher, WatchError};

use crate::exit_error::ExitError;

/// How long the side tasks get to drain trailing events after the job
/// reaches a terminal state.
const DRAIN_WINDOW: Duration = Duration::from_millis(250);

pub(crate) async fn follow_job(
    client: Arc<RestClient>,
    session: SessionId,
    job_id: JobId,
) -> Result<()> {
    let config = client.config();
    let token = config.require_token()?.to_string();
    let events_base = config.events_base();
    let channel = EventChannel::open(&events_base, &session, &token).await?;

    let cancel = CancellationToken::new();

    // All consumers subscribe before the first REST read so nothing slips
    // through between the snapshot and the stream.
    let mut tracker = JobTracker::new(
        channel.subscribe(),
        client.clone(),
        session.clone(),
        job_id.clone(),
    )
    .with_cancellation(cancel.clone());
    let mut output = OutputWatcher::new(
        channel.subscribe(),
        client.clone(),
        session.clone(),
        job_id.clone(),
    )
    .with_cancellation(cancel.clone());
    let mut datasets = DatasetWatcher::new(
        channel.subscribe(),
        client.clone(),
        session.clone(),
        job_id.clone(),
    )
    .with_cancellation(cancel.clone());

    // The job may already be terminal; events alone would never tell us.
    let initial = client.get_job(&session, &job_id).await?;
    print_state(&initial);
    if initial.state.is_terminal() {
        if let Some(text) = initial.screen_output.as_deref() {
            print!("{text}");
            std::io::stdout().flush()?;
        }
        for ds in client.list_datasets(&session).await? {
            if ds.produced_by(&job_id) {
                println!("* dataset created: {} {}", ds.name, ds.dataset_id);
            }
        }
        channel.close();
        if initial.state.is_terminal_failure() {
            let err = WatchError::JobFailed {
                state: initial.state,
                state_detail: initial.state_detail,
            };
            return Err(ExitError::job_failure(err.to_string()).into());
        }
        return Ok(());
    }

    let output_task = tokio::spawn(async move {
        while let Some(delta) = output.next().await {
            match delta {
                Ok(text) => {
                    print!("{text}");
                    let _ = std::io::stdout().flush();
                }
                Err(err) => {
                    tracing::debug!(%err, "output stream stopped");
                    break;
                }
            }
        }
    });
    let dataset_task = tokio::spawn(async move {
        while let Some(item) = datasets.next().await {
            match item {
                Ok(ds) => println!("* dataset created: {} {}", ds.name, ds.dataset_id),
                Err(err) => {
                    tracing::debug!(%err, "dataset stream stopped");
                    break;
                }
            }
        }
    });

    let mut last_key = (initial.state.clone(), initial.state_detail.clone());
    let outcome = loop {
        match tracker.next().await {
            Some(Ok(record)) => {
                let key = (record.state.clone(), record.state_detail.clone());
                if key != last_key {
                    print_state(&record);
                    last_key = key;
                }
                if record.state.is_terminal_success() {
                    break Ok(());
                }
            }
            Some(Err(err @ WatchError::JobFailed { .. })) => {
                break Err(ExitError::job_failure(err.to_string()).into());
            }
            Some(Err(err)) => break Err(anyhow::Error::from(err)),
            None => {
                break Err(anyhow::anyhow!(
                    "event stream ended before job {job_id} finished"
                ));
            }
        }
    };

    // Final output and dataset events may still be in flight.
    tokio::time::sleep(DRAIN_WINDOW).await;
    cancel.cancel();
    channel.close();
    let _ = output_task.await;
    let _ = dataset_task.await;

    outcome
}

fn print_state(record: &JobRecord) {
    println!("{}", format_state_line(record));
}

/// `* RUNNING (building index)` — detail in parentheses only when present.
fn format_state_line(record: &JobRecord) -> String {
    match record.state_detail.as_deref().filter(|d| !d.is_empty()) {
        Some(detail) => format!("* {} ({detail})", record.state),
        None => format!("* {}", record.state),
    }
}

#[cfg(test)]
#[path = "follow_tests.rs"]
mod tests;
