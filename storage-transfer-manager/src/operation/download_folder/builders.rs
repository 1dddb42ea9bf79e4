/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::{path::PathBuf, sync::Arc};

use crate::cancel::CancellationToken;
use crate::error::Error;

use super::{DownloadFolderHandle, DownloadFolderInputBuilder};

/// Fluent builder for constructing a folder download transfer
#[derive(Debug)]
pub struct DownloadFolderFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DownloadFolderInputBuilder,
}

impl DownloadFolderFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// Initiate a download transfer for a folder of objects
    pub async fn send(self) -> Result<DownloadFolderHandle, Error> {
        let input = self.inner.build()?;
        crate::operation::download_folder::DownloadFolder::orchestrate(self.handle, input).await
    }

    /// Set the container holding the folder's objects to download.
    pub fn container(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.container(input);
        self
    }

    /// Set the container holding the folder's objects to download.
    pub fn set_container(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_container(input);
        self
    }

    /// The container holding the folder's objects.
    pub fn get_container(&self) -> &Option<String> {
        self.inner.get_container()
    }

    /// Set the destination directory to which files should be downloaded
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.destination(input);
        self
    }

    /// Set the destination directory to which files should be downloaded
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.inner = self.inner.set_destination(input);
        self
    }

    /// The destination directory to which files should be downloaded
    pub fn get_destination(&self) -> &Option<PathBuf> {
        self.inner.get_destination()
    }

    /// Limit the download to keys that begin with the given folder prefix
    pub fn prefix(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.prefix(input);
        self
    }

    /// Limit the download to keys that begin with the given folder prefix
    pub fn set_prefix(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_prefix(input);
        self
    }

    /// The folder prefix the download is limited to
    pub fn get_prefix(&self) -> &Option<String> {
        self.inner.get_prefix()
    }

    /// Set the display name of the folder.
    ///
    /// When set, a subdirectory of this name is created under the destination
    /// (reused when it already exists) and objects are downloaded into it.
    pub fn folder_name(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.folder_name(input);
        self
    }

    /// Set the display name of the folder.
    pub fn set_folder_name(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_folder_name(input);
        self
    }

    /// The display name of the folder.
    pub fn get_folder_name(&self) -> &Option<String> {
        self.inner.get_folder_name()
    }

    /// Set the cancellation signal the whole batch should observe.
    pub fn cancellation_token(mut self, input: CancellationToken) -> Self {
        self.inner = self.inner.cancellation_token(input);
        self
    }

    /// The cancellation signal the whole batch should observe.
    pub fn get_cancellation_token(&self) -> &Option<CancellationToken> {
        self.inner.get_cancellation_token()
    }
}

impl crate::operation::download_folder::input::DownloadFolderInputBuilder {
    /// Initiate a download transfer for a folder with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<DownloadFolderHandle, Error> {
        let mut fluent_builder = client.download_folder();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
