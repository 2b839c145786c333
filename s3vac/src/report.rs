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

use s3vac_drain::{DeleteTarget, DrainReport, EntryKind, ReportSink};

/// Prints one line per would-be deletion in dry-run mode. Preview output
/// goes to stdout; logs go to stderr, so the two never interleave.
pub struct StdoutSink {
    bucket: String,
}

impl StdoutSink {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
        }
    }
}

impl ReportSink for StdoutSink {
    fn preview(&mut self, kind: EntryKind, target: &DeleteTarget) {
        println!("{}", preview_line(&self.bucket, kind, target));
    }
}

pub fn preview_line(bucket: &str, kind: EntryKind, target: &DeleteTarget) -> String {
    match kind {
        EntryKind::Object => format!("(dryrun) delete: s3://{bucket}/{}", target.key),
        EntryKind::DeleteMarker => format!("(dryrun) delete marker: s3://{bucket}/{target}"),
        EntryKind::Version => format!("(dryrun) delete version: s3://{bucket}/{target}"),
    }
}

/// The final human-readable summary. Counts are entries observed in
/// listings; delete failures are reported separately.
pub fn summary_line(dry_run: bool, objects: &DrainReport, versions: &DrainReport) -> String {
    let prefix = if dry_run { "(dryrun) " } else { "" };
    format!(
        "{prefix}Deleted {} objects and {} versions.",
        objects.processed, versions.processed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_lines_match_the_reported_shapes() {
        let object = DeleteTarget::object("path/file.txt");
        assert_eq!(
            preview_line("b", EntryKind::Object, &object),
            "(dryrun) delete: s3://b/path/file.txt"
        );

        let marker = DeleteTarget::version("path/file.txt", "m1");
        assert_eq!(
            preview_line("b", EntryKind::DeleteMarker, &marker),
            "(dryrun) delete marker: s3://b/path/file.txt#m1"
        );

        let version = DeleteTarget::version("path/file.txt", "v1");
        assert_eq!(
            preview_line("b", EntryKind::Version, &version),
            "(dryrun) delete version: s3://b/path/file.txt#v1"
        );
    }

    #[test]
    fn test_summary_line() {
        let objects = DrainReport {
            processed: 7,
            ..Default::default()
        };
        let versions = DrainReport {
            processed: 12,
            ..Default::default()
        };

        assert_eq!(
            summary_line(false, &objects, &versions),
            "Deleted 7 objects and 12 versions."
        );
        assert_eq!(
            summary_line(true, &objects, &versions),
            "(dryrun) Deleted 7 objects and 12 versions."
        );
    }
}
