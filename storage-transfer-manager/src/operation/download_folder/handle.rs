/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::atomic::Ordering;

use tokio::task;

use super::{DownloadFolderContext, DownloadFolderOutput};

/// Handle for `DownloadFolder` transfer operation
#[derive(Debug)]
#[non_exhaustive]
pub struct DownloadFolderHandle {
    /// All child tasks spawned for this download
    pub(crate) tasks: task::JoinSet<Result<(), crate::error::Error>>,
    /// The context used to drive the transfer to completion
    pub(crate) ctx: DownloadFolderContext,
}

impl DownloadFolderHandle {
    /// Consume the handle and wait for the folder download to complete.
    ///
    /// Every per-object attempt has settled by the time this returns, so the
    /// output's succeeded/failed accounting covers exactly the listed objects.
    #[tracing::instrument(skip_all, level = "debug", name = "download-folder-join")]
    pub async fn join(mut self) -> Result<DownloadFolderOutput, crate::error::Error> {
        // join all tasks
        while let Some(join_result) = self.tasks.join_next().await {
            join_result??;
        }

        let failed_downloads =
            std::mem::take(&mut *self.ctx.state().failed_downloads.lock().unwrap());
        let successful_downloads = self
            .ctx
            .state()
            .successful_downloads
            .load(Ordering::SeqCst);
        let total_bytes_transferred = self
            .ctx
            .state()
            .total_bytes_transferred
            .load(Ordering::SeqCst);

        let output = DownloadFolderOutput::builder()
            .objects_downloaded(successful_downloads)
            .set_failed_transfers(Some(failed_downloads))
            .total_bytes_transferred(total_bytes_transferred)
            .build();

        Ok(output)
    }
}
