// Copyright 2025 S3Vac Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::batch::{BatchBuilder, MAX_DELETE_BATCH};
use crate::client::{ListingKind, StorageClient};
use crate::error::DrainError;
use crate::page::{consume_page, DrainMode, ReportSink};
use crate::types::DeleteFailure;

/// Options for one drain invocation.
#[derive(Debug, Clone, Copy)]
pub struct DrainOptions {
    pub mode: DrainMode,
    /// Backend-imposed maximum targets per delete call.
    pub batch_capacity: usize,
}

impl Default for DrainOptions {
    fn default() -> Self {
        Self {
            mode: DrainMode::Live,
            batch_capacity: MAX_DELETE_BATCH,
        }
    }
}

/// Accumulated result of one drain: everything observed, everything the
/// backend confirmed deleted, and everything that went wrong.
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Entries observed across all pages, independent of batching.
    pub processed: u64,
    /// Deletions the backend confirmed. Always zero in dry-run mode.
    pub deleted: u64,
    /// Per-target delete failures, recorded and carried on past.
    pub failures: Vec<DeleteFailure>,
    /// Set when a hard error stopped pagination early; the counts above
    /// still cover everything processed up to that point.
    pub aborted: Option<DrainError>,
}

impl DrainReport {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Drives pagination of one listing kind to completion.
///
/// Each page is consumed, counted, and — in live mode — its batches are
/// deleted before the next page is fetched. A delete call reporting
/// per-target failures is recorded and the drain continues; a failed page
/// fetch or delete transport error aborts the remaining pages. Cancellation
/// is observed between pages only: an in-flight call completes, no further
/// pages are requested.
pub async fn drain(
    client: &dyn StorageClient,
    bucket: &str,
    kind: ListingKind,
    options: DrainOptions,
    sink: &mut dyn ReportSink,
    cancel: &CancellationToken,
) -> DrainReport {
    let mut report = DrainReport::default();
    let mut builder = BatchBuilder::new(options.batch_capacity);
    let mut token = None;

    loop {
        if cancel.is_cancelled() {
            warn!("cancellation observed, stopping {kind:?} drain after {} entries", report.processed);
            break;
        }

        let listed = match client.list_page(bucket, kind, token.take()).await {
            Ok(listed) => listed,
            Err(err) => {
                report.aborted = Some(err);
                break;
            }
        };
        let next = listed.next;

        let (delta, mut batches) = consume_page(listed.page, options.mode, &mut builder, sink);
        report.processed += delta;
        debug!("consumed one {kind:?} page with {delta} entries");

        // The batch never spans pages: whatever is pending goes out with
        // this page's batches.
        batches.extend(builder.flush());
        for batch in batches {
            debug!("deleting a batch of {} targets", batch.len());
            match client.delete_batch(bucket, batch).await {
                Ok(outcome) => {
                    report.deleted += outcome.deleted;
                    report.failures.extend(outcome.failures);
                }
                Err(err) => {
                    report.aborted = Some(err);
                    return report;
                }
            }
        }

        match next {
            Some(t) => token = Some(t),
            None => break,
        }
    }

    report
}
