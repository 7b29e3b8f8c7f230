// src/tasks/poll_cycle.rs

use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Local;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::context::MonitorContext;
use crate::models::{AccountDescriptor, CycleReport, PollResult, StatBlock};
use crate::pool::ConnectionPool;
use crate::scratch::ScratchDir;
use crate::stats::extract_stats;
use crate::traits::TextRecognizer;
use crate::Error;

/// Polls every account once, each in its own task, and gathers one result
/// per account in account order.
///
/// Never fails as a whole: any per-account problem becomes an offline result.
pub async fn run_poll_cycle(ctx: &MonitorContext, run: u64) -> CycleReport {
    let started = Instant::now();

    let handles: Vec<_> = ctx
        .accounts
        .iter()
        .cloned()
        .map(|account| {
            let pool = Arc::clone(&ctx.pool);
            let recognizer = Arc::clone(&ctx.recognizer);
            let scratch = ctx.scratch.clone();
            tokio::spawn(async move {
                check_account(&account, &pool, recognizer.as_ref(), &scratch).await
            })
        })
        .collect();

    let joined = join_all(handles).await;

    let results: Vec<PollResult> = ctx
        .accounts
        .iter()
        .zip(joined)
        .map(|(account, outcome)| match outcome {
            Ok(result) => result,
            Err(join_err) => {
                warn!("Poll task for account #{} died: {}", account.index, join_err);
                PollResult::offline(account, "poll task aborted")
            }
        })
        .collect();

    debug!(
        "Cycle #{} finished in {:?} ({} accounts)",
        run,
        started.elapsed(),
        results.len()
    );

    CycleReport {
        run,
        finished_at: Local::now(),
        results,
    }
}

/// Screenshot, OCR and parse for one account, with errors folded into the result.
pub async fn check_account(
    account: &AccountDescriptor,
    pool: &ConnectionPool,
    recognizer: &dyn TextRecognizer,
    scratch: &ScratchDir,
) -> PollResult {
    match poll_account(account, pool, recognizer, scratch).await {
        Ok(stats) => PollResult::online(account, stats),
        Err(e) => {
            warn!("Account #{} offline: {}", account.index, e);
            PollResult::offline(account, e.detail())
        }
    }
}

async fn poll_account(
    account: &AccountDescriptor,
    pool: &ConnectionPool,
    recognizer: &dyn TextRecognizer,
    scratch: &ScratchDir,
) -> Result<StatBlock, Error> {
    let session = pool.acquire(account).await?;
    let payload = session.screenshot().await?;
    let image = decode_screenshot(&payload)?;

    // The scratch file is removed whatever happens after it was written.
    let path = scratch.path_for(account.index);
    let recognized = match scratch.write(account.index, &image).await {
        Ok(written) => recognizer.recognize(&written).await,
        Err(e) => Err(e),
    };
    scratch.discard(&path).await;

    Ok(extract_stats(&recognized?))
}

/// Decodes a base64 screenshot, with or without a `data:image/...;base64,` prefix.
pub fn decode_screenshot(payload: &str) -> Result<Vec<u8>, Error> {
    let data = match payload.split_once("base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    };
    Ok(STANDARD.decode(data.trim())?)
}
