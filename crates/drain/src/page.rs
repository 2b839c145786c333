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

use crate::batch::{Batch, BatchBuilder};
use crate::types::{DeleteTarget, EntryKind, Page, VersionEntry};

/// Whether deletions are performed or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainMode {
    Live,
    DryRun,
}

impl DrainMode {
    pub fn is_dry_run(self) -> bool {
        matches!(self, DrainMode::DryRun)
    }
}

/// Receives entries that would be deleted when running in dry-run mode.
pub trait ReportSink: Send {
    fn preview(&mut self, kind: EntryKind, target: &DeleteTarget);
}

/// Routes every entry of one page: to the batch builder in live mode, to the
/// report sink in dry-run mode. Returns the page's entry count and any
/// batches that filled mid-page.
///
/// Version pages feed delete markers first, then versions, so one combined
/// batch covers the whole page unless it fills in between.
pub fn consume_page(
    page: Page,
    mode: DrainMode,
    builder: &mut BatchBuilder,
    sink: &mut dyn ReportSink,
) -> (u64, Vec<Batch>) {
    let count = page.len() as u64;
    let mut emitted = Vec::new();

    match page {
        Page::Objects { keys } => {
            for key in keys {
                let target = DeleteTarget::object(key);
                route(EntryKind::Object, target, mode, builder, sink, &mut emitted);
            }
        }
        Page::Versions {
            versions,
            delete_markers,
        } => {
            for VersionEntry { key, version_id } in delete_markers {
                let target = DeleteTarget::version(key, version_id);
                route(EntryKind::DeleteMarker, target, mode, builder, sink, &mut emitted);
            }
            for VersionEntry { key, version_id } in versions {
                let target = DeleteTarget::version(key, version_id);
                route(EntryKind::Version, target, mode, builder, sink, &mut emitted);
            }
        }
    }

    (count, emitted)
}

fn route(
    kind: EntryKind,
    target: DeleteTarget,
    mode: DrainMode,
    builder: &mut BatchBuilder,
    sink: &mut dyn ReportSink,
    emitted: &mut Vec<Batch>,
) {
    match mode {
        DrainMode::DryRun => sink.preview(kind, &target),
        DrainMode::Live => emitted.extend(builder.push(target)),
    }
}
