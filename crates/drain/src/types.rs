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

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit the storage backend will remove.
///
/// An absent `version_id` deletes the current object (on a versioned bucket
/// the backend answers with a delete marker instead); a present one deletes
/// that specific version or marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTarget {
    pub key: String,
    pub version_id: Option<String>,
}

impl DeleteTarget {
    pub fn object(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: None,
        }
    }

    pub fn version(key: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: Some(version_id.into()),
        }
    }
}

impl fmt::Display for DeleteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_id {
            Some(version_id) => write!(f, "{}#{}", self.key, version_id),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Classification of a listed entry, used to label dry-run output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Object,
    Version,
    DeleteMarker,
}

/// A historical revision or delete marker, identified by key + version id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub key: String,
    pub version_id: String,
}

/// One server-returned listing chunk, consumed once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// A page of current objects.
    Objects { keys: Vec<String> },
    /// A page of version history: historical versions plus delete markers.
    Versions {
        versions: Vec<VersionEntry>,
        delete_markers: Vec<VersionEntry>,
    },
}

impl Page {
    /// Total number of entries on this page, regardless of shape.
    pub fn len(&self) -> usize {
        match self {
            Page::Objects { keys } => keys.len(),
            Page::Versions {
                versions,
                delete_markers,
            } => versions.len() + delete_markers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-target failure reported by a batch-delete call.
///
/// Retained for reporting, never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFailure {
    pub target: DeleteTarget,
    pub code: String,
    pub message: String,
}

/// Result of one batch-delete call: confirmed deletions plus per-target
/// failures.
#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    pub deleted: u64,
    pub failures: Vec<DeleteFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_target_constructors() {
        let object = DeleteTarget::object("path/to/key");
        assert_eq!(object.key, "path/to/key");
        assert!(object.version_id.is_none());

        let version = DeleteTarget::version("path/to/key", "v1");
        assert_eq!(version.key, "path/to/key");
        assert_eq!(version.version_id.as_deref(), Some("v1"));
    }

    #[test]
    fn test_delete_target_display() {
        assert_eq!(DeleteTarget::object("a/b").to_string(), "a/b");
        assert_eq!(DeleteTarget::version("a/b", "v7").to_string(), "a/b#v7");
    }

    #[test]
    fn test_delete_target_serialization() {
        let target = DeleteTarget::version("docs/readme.txt", "3sL4kqtJlcpXro");

        let json = serde_json::to_string(&target).unwrap();
        let deserialized: DeleteTarget = serde_json::from_str(&json).unwrap();

        assert_eq!(target, deserialized);
    }

    #[test]
    fn test_page_len() {
        let objects = Page::Objects {
            keys: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(objects.len(), 2);
        assert!(!objects.is_empty());

        let versions = Page::Versions {
            versions: vec![VersionEntry {
                key: "a".to_string(),
                version_id: "v1".to_string(),
            }],
            delete_markers: vec![
                VersionEntry {
                    key: "a".to_string(),
                    version_id: "v2".to_string(),
                },
                VersionEntry {
                    key: "b".to_string(),
                    version_id: "v3".to_string(),
                },
            ],
        };
        assert_eq!(versions.len(), 3);

        let empty = Page::Objects { keys: vec![] };
        assert!(empty.is_empty());
    }
}
