/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::cancel::CancellationToken;

/// Input type for downloading a folder of objects
#[non_exhaustive]
#[derive(Clone)]
pub struct DownloadFolderInput {
    /// The container holding the folder's objects.
    pub container: Option<String>,

    /// The destination directory to which files should be downloaded
    pub destination: Option<PathBuf>,

    /// Limit the download to keys that begin with the given folder prefix
    pub prefix: Option<String>,

    /// Display name of the folder.
    ///
    /// When set, a subdirectory of this name is created under the destination
    /// (reused when it already exists) and objects are downloaded into it.
    pub folder_name: Option<String>,

    /// Cooperative cancellation signal for the whole batch.
    pub cancellation: Option<CancellationToken>,
}

impl DownloadFolderInput {
    /// Creates a new builder-style object to manufacture [`DownloadFolderInput`](crate::operation::download_folder::DownloadFolderInput).
    pub fn builder() -> DownloadFolderInputBuilder {
        DownloadFolderInputBuilder::default()
    }

    /// The container holding the folder's objects.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// The destination directory to which files should be downloaded
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Limit the download to keys that begin with the given folder prefix
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Display name of the folder.
    pub fn folder_name(&self) -> Option<&str> {
        self.folder_name.as_deref()
    }

    /// Cooperative cancellation signal for the whole batch.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }
}

impl fmt::Debug for DownloadFolderInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("DownloadFolderInput");
        formatter.field("container", &self.container);
        formatter.field("destination", &self.destination);
        formatter.field("prefix", &self.prefix);
        formatter.field("folder_name", &self.folder_name);
        formatter.field("cancellation", &self.cancellation.is_some());
        formatter.finish()
    }
}

/// A builder for [`DownloadFolderInput`](crate::operation::download_folder::DownloadFolderInput).
#[non_exhaustive]
#[derive(Clone, Default)]
pub struct DownloadFolderInputBuilder {
    pub(crate) container: Option<String>,
    pub(crate) destination: Option<PathBuf>,
    pub(crate) prefix: Option<String>,
    pub(crate) folder_name: Option<String>,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl DownloadFolderInputBuilder {
    /// Set the container holding the folder's objects to download.
    ///
    /// NOTE: A container is required.
    pub fn container(mut self, input: impl Into<String>) -> Self {
        self.container = Some(input.into());
        self
    }

    /// Set the container holding the folder's objects to download.
    ///
    /// NOTE: A container is required.
    pub fn set_container(mut self, input: Option<String>) -> Self {
        self.container = input;
        self
    }

    /// The container holding the folder's objects.
    pub fn get_container(&self) -> &Option<String> {
        &self.container
    }

    /// Set the destination directory to which files should be downloaded
    ///
    /// NOTE: A destination directory is required.
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// Set the destination directory to which files should be downloaded
    ///
    /// NOTE: A destination directory is required.
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// The destination directory to which files should be downloaded
    pub fn get_destination(&self) -> &Option<PathBuf> {
        &self.destination
    }

    /// Limit the download to keys that begin with the given folder prefix
    pub fn prefix(mut self, input: impl Into<String>) -> Self {
        self.prefix = Some(input.into());
        self
    }

    /// Limit the download to keys that begin with the given folder prefix
    pub fn set_prefix(mut self, input: Option<String>) -> Self {
        self.prefix = input;
        self
    }

    /// The folder prefix the download is limited to
    pub fn get_prefix(&self) -> &Option<String> {
        &self.prefix
    }

    /// Set the display name of the folder.
    ///
    /// When set, a subdirectory of this name is created under the destination
    /// (reused when it already exists) and objects are downloaded into it.
    pub fn folder_name(mut self, input: impl Into<String>) -> Self {
        self.folder_name = Some(input.into());
        self
    }

    /// Set the display name of the folder.
    pub fn set_folder_name(mut self, input: Option<String>) -> Self {
        self.folder_name = input;
        self
    }

    /// The display name of the folder.
    pub fn get_folder_name(&self) -> &Option<String> {
        &self.folder_name
    }

    /// Set the cancellation signal the whole batch should observe.
    pub fn cancellation_token(mut self, input: CancellationToken) -> Self {
        self.cancellation = Some(input);
        self
    }

    /// Set the cancellation signal the whole batch should observe.
    pub fn set_cancellation_token(mut self, input: Option<CancellationToken>) -> Self {
        self.cancellation = input;
        self
    }

    /// The cancellation signal the whole batch should observe.
    pub fn get_cancellation_token(&self) -> &Option<CancellationToken> {
        &self.cancellation
    }

    /// Consumes the builder and constructs a [`DownloadFolderInput`](crate::operation::download_folder::DownloadFolderInput).
    pub fn build(self) -> Result<DownloadFolderInput, BuildError> {
        if self.container.is_none() {
            return Err(BuildError::missing_field(
                "container",
                "A container is required",
            ));
        }

        if self.destination.is_none() {
            return Err(BuildError::missing_field(
                "destination",
                "Destination directory is required",
            ));
        }

        Ok(DownloadFolderInput {
            container: self.container,
            destination: self.destination,
            prefix: self.prefix,
            folder_name: self.folder_name,
            cancellation: self.cancellation,
        })
    }
}

impl fmt::Debug for DownloadFolderInputBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("DownloadFolderInputBuilder");
        formatter.field("container", &self.container);
        formatter.field("destination", &self.destination);
        formatter.field("prefix", &self.prefix);
        formatter.field("folder_name", &self.folder_name);
        formatter.field("cancellation", &self.cancellation.is_some());
        formatter.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::DownloadFolderInput;

    #[test]
    fn test_no_destination_error() {
        let err = DownloadFolderInput::builder()
            .container("test-container")
            .build()
            .unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("Destination directory is required"));
    }

    #[test]
    fn test_no_container_error() {
        let err = DownloadFolderInput::builder()
            .destination("/tmp/test")
            .build()
            .unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("A container is required"));
    }
}
