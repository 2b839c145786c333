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

use thiserror::Error;

/// Drain-level failures, classified once at the storage-client boundary.
///
/// Everything above that boundary deals only in these kinds, never raw
/// transport errors. Per-target delete failures are not errors of this type:
/// they are non-fatal and travel in
/// [`DeleteOutcome::failures`](crate::DeleteOutcome).
#[derive(Debug, Error)]
pub enum DrainError {
    /// The bucket does not exist. Surfaced distinctly because it is the most
    /// common operator mistake.
    #[error("bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    /// A backend request (region lookup, page fetch, batch delete) failed.
    #[error("{operation} failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl DrainError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }

    pub fn is_bucket_not_found(&self) -> bool {
        matches!(self, Self::BucketNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DrainError::BucketNotFound {
            bucket: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "bucket not found: missing");

        let err = DrainError::backend("ListObjectsV2", "connection reset");
        assert_eq!(err.to_string(), "ListObjectsV2 failed: connection reset");
    }

    #[test]
    fn test_is_bucket_not_found() {
        assert!(DrainError::BucketNotFound {
            bucket: "b".to_string()
        }
        .is_bucket_not_found());
        assert!(!DrainError::backend("DeleteObjects", "timeout").is_bucket_not_found());
    }
}
