/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! A client for moving objects out of bucket/key-addressed storage.
//!
//! The transfer manager is a high level abstraction over a base object store
//! [service API]. It downloads a single object into memory or to a local
//! file, or an entire folder (key prefix) to a local directory, with
//! cooperative cancellation, progress reporting, and per-object failure
//! accounting for folder transfers.
//!
//! [service API]: https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations_Amazon_Simple_Storage_Service.html
//!
//! # Examples
//!
//! Load the default configuration:
//!
//! ```no_run
//! # async fn example() {
//! let config = storage_transfer_manager::from_env().load().await;
//! let client = storage_transfer_manager::Client::new(config);
//! # }
//! ```
//!
//! Download a folder to a local directory:
//!
//! ```no_run
//! # async fn example() -> Result<(), storage_transfer_manager::error::Error> {
//! let config = storage_transfer_manager::from_env().load().await;
//! let client = storage_transfer_manager::Client::new(config);
//!
//! let handle = client
//!     .download_folder()
//!     .container("my-container")
//!     .prefix("notes/2024/")
//!     .destination("/tmp/notes")
//!     .send()
//!     .await?;
//!
//! // wait for every per-object download to settle
//! let summary = handle.join().await?;
//! println!("{} downloaded", summary.objects_downloaded());
//!
//! # Ok(())
//! # }
//! ```
//!
//! See the documentation for each client operation for more information:
//!
//! * [`download`](crate::Client::download) - download a single object
//! * [`download_folder`](crate::Client::download_folder) - download every object under a folder prefix to a local directory

/// Default in-flight concurrency for folder downloads
pub(crate) const DEFAULT_CONCURRENCY: usize = 8;

/// Error types emitted by `storage-transfer-manager`
pub mod error;

/// Common types used by `storage-transfer-manager`
pub mod types;

/// Cooperative cancellation signals
pub mod cancel;

/// Progress projection and reporting
pub mod progress;

/// Types and helpers for I/O
pub mod io;

/// Transfer manager client
pub mod client;

/// Transfer manager operations
pub mod operation;

/// Transfer manager configuration
pub mod config;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
