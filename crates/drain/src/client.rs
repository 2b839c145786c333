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

use async_trait::async_trait;

use crate::batch::Batch;
use crate::error::DrainError;
use crate::types::{DeleteOutcome, Page};

/// Which server-side listing a drain walks: current objects, or version
/// history (versions plus delete markers). The two touch disjoint resources
/// and may be drained in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Objects,
    Versions,
}

/// Opaque continuation for the next page fetch.
///
/// Object listings continue from a single token; version listings continue
/// from a key marker / version-id marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    Objects {
        continuation: String,
    },
    Versions {
        key_marker: Option<String>,
        version_id_marker: Option<String>,
    },
}

/// One fetched page plus the continuation for the next one.
/// `next == None` signals the last page.
#[derive(Debug, Clone)]
pub struct ListedPage {
    pub page: Page,
    pub next: Option<PageToken>,
}

/// Capability boundary to the storage backend.
///
/// The engine needs exactly two operations: fetch one bounded page of a
/// listing, and delete one bounded batch of targets. Implementations
/// classify their transport errors into [`DrainError`] here; nothing above
/// this trait sees a raw backend error.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn list_page(
        &self,
        bucket: &str,
        kind: ListingKind,
        token: Option<PageToken>,
    ) -> Result<ListedPage, DrainError>;

    async fn delete_batch(&self, bucket: &str, batch: Batch) -> Result<DeleteOutcome, DrainError>;
}
