/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::types::ConcurrencySetting;
use crate::Config;
use crate::DEFAULT_CONCURRENCY;

/// Transfer manager client for bucket/key-addressed object storage.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations, e.g. config, env details, etc
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// Get the concrete number of workers to use based on the concurrency setting.
    pub(crate) fn num_workers(&self) -> usize {
        match self.config.concurrency() {
            ConcurrencySetting::Auto => DEFAULT_CONCURRENCY,
            ConcurrencySetting::Explicit(concurrency) => (*concurrency).max(1),
        }
    }
}

impl Client {
    /// Creates a new client from a transfer manager config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Download a single object.
    ///
    /// The object is accumulated in memory unless a file destination is set
    /// on the builder. Supply a [`CancellationToken`](crate::cancel::CancellationToken)
    /// and/or a [`ProgressSink`](crate::progress::ProgressSink) to observe the
    /// transfer while it is in flight.
    ///
    /// Constructs a fluent builder for the
    /// [`Download`](crate::operation::download::builders::DownloadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::error::Error;
    /// use bytes::Buf;
    ///
    /// async fn get_object(client: &storage_transfer_manager::Client) -> Result<(), Box<dyn Error>> {
    ///     let output = client
    ///         .download()
    ///         .container("my-container")
    ///         .key("notes/readme.txt")
    ///         .send()
    ///         .await?;
    ///
    ///     let data = output.into_body().expect("in-memory download");
    ///     println!("received {} bytes", data.remaining());
    ///     Ok(())
    /// }
    /// ```
    pub fn download(&self) -> crate::operation::download::builders::DownloadFluentBuilder {
        crate::operation::download::builders::DownloadFluentBuilder::new(self.handle.clone())
    }

    /// Download every object under a folder prefix to a local directory.
    ///
    /// Constructs a fluent builder for the
    /// [`DownloadFolder`](crate::operation::download_folder::builders::DownloadFolderFluentBuilder) operation.
    ///
    /// # Examples
    /// ```no_run
    /// use std::path::PathBuf;
    /// use storage_transfer_manager::error::Error;
    ///
    /// async fn download_folder(
    ///     client: &storage_transfer_manager::Client,
    ///     dest: PathBuf
    /// ) -> Result<(), Error> {
    ///     let handle = client
    ///         .download_folder()
    ///         .container("my-container")
    ///         .prefix("photos/2024/")
    ///         .destination(dest)
    ///         .send()
    ///         .await?;
    ///
    ///     // wait for every per-object download to settle
    ///     let summary = handle.join().await?;
    ///     println!(
    ///         "{} downloaded, {} failed",
    ///         summary.objects_downloaded(),
    ///         summary.failed_transfers().len()
    ///     );
    ///     Ok(())
    /// }
    /// ```
    pub fn download_folder(
        &self,
    ) -> crate::operation::download_folder::builders::DownloadFolderFluentBuilder {
        crate::operation::download_folder::builders::DownloadFolderFluentBuilder::new(
            self.handle.clone(),
        )
    }
}
