/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::cancel::CancellationToken;
use crate::error::Error;
use crate::progress::ProgressSink;
use crate::types::DownloadDestination;

use super::{DownloadInputBuilder, DownloadOutput};

/// Fluent builder for constructing a single object download transfer
#[derive(Debug)]
pub struct DownloadFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DownloadInputBuilder,
}

impl DownloadFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Initiate a download transfer for a single object and wait for it to complete
    pub async fn send(self) -> Result<DownloadOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::download::Download::orchestrate(self.handle, input).await
    }

    /// Set the container holding the object to download.
    pub fn container(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.container(input);
        self
    }

    /// Set the container holding the object to download.
    pub fn set_container(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_container(input);
        self
    }

    /// The container holding the object.
    pub fn get_container(&self) -> &Option<String> {
        self.inner.get_container()
    }

    /// Set the key of the object to download.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.key(input);
        self
    }

    /// Set the key of the object to download.
    pub fn set_key(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_key(input);
        self
    }

    /// The key of the object to download.
    pub fn get_key(&self) -> &Option<String> {
        self.inner.get_key()
    }

    /// Set the advisory total size of the object in bytes.
    pub fn size_hint(mut self, input: u64) -> Self {
        self.inner = self.inner.size_hint(input);
        self
    }

    /// The advisory total size of the object in bytes.
    pub fn get_size_hint(&self) -> &Option<u64> {
        self.inner.get_size_hint()
    }

    /// Set where the downloaded bytes should end up.
    ///
    /// Defaults to an in-memory buffer returned through the operation output.
    pub fn destination(mut self, input: impl Into<DownloadDestination>) -> Self {
        self.inner = self.inner.destination(input);
        self
    }

    /// Where the downloaded bytes should end up.
    pub fn get_destination(&self) -> &DownloadDestination {
        self.inner.get_destination()
    }

    /// Set the cancellation signal the download should observe.
    pub fn cancellation_token(mut self, input: CancellationToken) -> Self {
        self.inner = self.inner.cancellation_token(input);
        self
    }

    /// The cancellation signal the download should observe.
    pub fn get_cancellation_token(&self) -> &Option<CancellationToken> {
        self.inner.get_cancellation_token()
    }

    /// Set the observer to invoke with progress updates.
    pub fn progress_sink(
        mut self,
        input: impl Fn(crate::progress::ProgressUpdate) + Send + Sync + 'static,
    ) -> Self {
        self.inner = self.inner.progress_sink(input);
        self
    }

    /// The observer to invoke with progress updates.
    pub fn get_progress_sink(&self) -> &Option<ProgressSink> {
        self.inner.get_progress_sink()
    }
}

impl crate::operation::download::input::DownloadInputBuilder {
    /// Initiate a download transfer for a single object with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<DownloadOutput, Error> {
        let mut fluent_builder = client.download();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
