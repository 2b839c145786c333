//! # s3vac drain engine
//!
//! The paginated-list-to-batched-delete engine behind `s3vac`: walks an
//! unbounded, server-paged listing of storage entries and converts it into
//! correctly-sized deletion batches.
//!
//! ## Components
//!
//! - [`BatchBuilder`]: accumulates [`DeleteTarget`]s up to a capacity and
//!   emits full [`Batch`]es, never dropping or splitting a target.
//! - [`consume_page`]: classifies one listing [`Page`] and routes every entry
//!   to the batch builder, or to a [`ReportSink`] in dry-run mode.
//! - [`drain`]: drives pagination for one [`ListingKind`] to completion and
//!   returns a [`DrainReport`] with the counts and any recorded failures.
//! - [`StorageClient`]: the capability boundary a backend must implement
//!   (one page fetch, one batch delete). The AWS-backed implementation lives
//!   in the `s3vac` binary crate; tests here run against scripted fakes.
//!
//! The engine performs no I/O of its own besides what the [`StorageClient`]
//! does, and never retries: a partial batch-delete failure is recorded and
//! the drain continues, while a failed page fetch or delete transport error
//! aborts the remaining pages of that listing kind.

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

pub mod batch;
pub mod client;
pub mod drain;
pub mod error;
pub mod page;
pub mod types;

// Re-export the main types for convenience
pub use batch::{Batch, BatchBuilder, MAX_DELETE_BATCH};
pub use client::{ListedPage, ListingKind, PageToken, StorageClient};
pub use drain::{DrainOptions, DrainReport, drain};
pub use error::DrainError;
pub use page::{DrainMode, ReportSink, consume_page};
pub use types::{DeleteFailure, DeleteOutcome, DeleteTarget, EntryKind, Page, VersionEntry};
