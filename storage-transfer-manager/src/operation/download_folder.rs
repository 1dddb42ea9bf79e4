/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{DownloadFolderInput, DownloadFolderInputBuilder};
mod output;
pub use output::{DownloadFolderOutput, DownloadFolderOutputBuilder};

mod handle;
pub use handle::DownloadFolderHandle;

mod list;
mod worker;

use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};

use path_clean::PathClean;
use tokio::fs;
use tokio::task::JoinSet;

use crate::cancel::CancellationToken;
use crate::error::{self, ErrorKind};
use crate::operation::TransferContext;
use crate::types::FailedDownload;

/// Operation struct for downloading every object under a folder prefix
#[derive(Clone, Default, Debug)]
pub(crate) struct DownloadFolder;

impl DownloadFolder {
    /// Execute a single `DownloadFolder` transfer operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DownloadFolderInput,
    ) -> Result<DownloadFolderHandle, error::Error> {
        let destination = resolve_destination(&input).await?;
        let concurrency = handle.num_workers();
        let ctx = DownloadFolderContext::new(handle, input, destination);

        // spawn all work into a joinable set so the session only settles once
        // every per-object attempt has settled
        let mut tasks = JoinSet::new();
        let (work_tx, work_rx) = async_channel::bounded(2 * concurrency);

        tasks.spawn(worker::discover_objects(ctx.clone(), work_tx));
        for _ in 0..concurrency {
            tasks.spawn(worker::download_objects(ctx.clone(), work_rx.clone()));
        }

        Ok(DownloadFolderHandle { tasks, ctx })
    }
}

/// Resolve the directory the folder's objects land in.
///
/// The destination root is created if absent. When the folder carries a
/// display name, a subdirectory of that name is created (or reused) under the
/// root and becomes the effective destination.
async fn resolve_destination(input: &DownloadFolderInput) -> Result<PathBuf, error::Error> {
    let root = input.destination().expect("destination set");

    match fs::metadata(root).await {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(error::invalid_input(format!(
                "destination is not a directory: '{}'",
                root.display()
            )))
        }
        Ok(_) => {}
        Err(_) => fs::create_dir_all(root).await?,
    }

    let destination = match input.folder_name() {
        Some(name) => {
            let subdir = root.join(name).clean();
            if !subdir.starts_with(root.clean()) {
                return Err(error::invalid_input(format!(
                    "folder name '{name}' resolves outside the destination directory"
                )));
            }
            // idempotent when the subdirectory already exists
            fs::create_dir_all(&subdir).await?;
            subdir
        }
        None => root.to_path_buf(),
    };

    Ok(destination)
}

/// Context for a folder download, shared by the discovery and download workers
pub(crate) type DownloadFolderContext = TransferContext<DownloadFolderState>;

impl DownloadFolderContext {
    pub(crate) fn new(
        handle: Arc<crate::client::Handle>,
        input: DownloadFolderInput,
        destination: PathBuf,
    ) -> Self {
        let cancel = input
            .cancellation()
            .cloned()
            .unwrap_or_else(CancellationToken::new);
        let state = DownloadFolderState {
            input,
            destination,
            cancel,
            successful_downloads: AtomicU64::default(),
            total_bytes_transferred: AtomicU64::default(),
            failed_downloads: Mutex::new(Vec::new()),
        };
        TransferContext::from_state(handle, state)
    }

    /// Record a settled per-object failure.
    ///
    /// Cancellations are not failures and must never land in the failure set.
    pub(crate) fn record_failure(&self, failed: FailedDownload) {
        debug_assert!(!matches!(
            failed.error().kind(),
            ErrorKind::OperationCancelled(_)
        ));
        let mut failures = self.state().failed_downloads.lock().unwrap();
        failures.push(failed);
    }
}

/// Mutable session state for a folder download.
///
/// The counters and the failure list are the only state shared across
/// concurrent per-object tasks; updates go through atomics and the mutex so
/// no interleaving loses an attempt.
#[derive(Debug)]
pub(crate) struct DownloadFolderState {
    pub(crate) input: DownloadFolderInput,
    pub(crate) destination: PathBuf,
    pub(crate) cancel: CancellationToken,
    pub(crate) successful_downloads: AtomicU64,
    pub(crate) total_bytes_transferred: AtomicU64,
    pub(crate) failed_downloads: Mutex<Vec<FailedDownload>>,
}
