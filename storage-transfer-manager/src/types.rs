/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::PathBuf;

/// The concurrency settings to use for a folder download.
#[derive(Debug, Clone, Default)]
pub enum ConcurrencySetting {
    /// Automatically configure an optimal concurrency setting based on the execution environment.
    #[default]
    Auto,

    /// Explicitly configured concurrency setting.
    Explicit(usize),
}

/// The agent responsible for cancelling an operation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum CancelledBy {
    /// The user explicitly cancelled the operation.
    User,

    /// An armed timeout elapsed. Carries the identity the timeout was
    /// registered with, for diagnostics.
    Timeout(String),
}

impl fmt::Display for CancelledBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelledBy::User => write!(f, "user"),
            CancelledBy::Timeout(id) => write!(f, "timeout '{id}'"),
        }
    }
}

/// Where the bytes of a single object download should end up.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub enum DownloadDestination {
    /// Accumulate the object into an in-memory buffer owned by the caller
    /// through the operation output.
    #[default]
    InMemory,

    /// Write the object to the given local path, creating or overwriting the
    /// file as needed.
    LocalFile(PathBuf),
}

impl DownloadDestination {
    /// The local path for file-mode downloads
    pub fn local_path(&self) -> Option<&std::path::Path> {
        match self {
            DownloadDestination::LocalFile(path) => Some(path),
            DownloadDestination::InMemory => None,
        }
    }
}

impl From<PathBuf> for DownloadDestination {
    fn from(value: PathBuf) -> Self {
        DownloadDestination::LocalFile(value)
    }
}

impl From<&std::path::Path> for DownloadDestination {
    fn from(value: &std::path::Path) -> Self {
        DownloadDestination::LocalFile(value.to_path_buf())
    }
}

impl From<&str> for DownloadDestination {
    fn from(value: &str) -> Self {
        DownloadDestination::LocalFile(PathBuf::from(value))
    }
}

/// A downloadable object as reported by a folder listing.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub(crate) container: String,
    pub(crate) key: String,
    pub(crate) name: String,
    pub(crate) size_bytes: u64,
}

impl RemoteObject {
    pub(crate) fn new(
        container: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
            name: name.into(),
            size_bytes,
        }
    }

    /// The container the object lives in
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The full key of the object
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The object's name relative to the listed folder prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The size of the object in bytes as reported by the listing.
    ///
    /// This is advisory; the byte count actually received by a download is
    /// authoritative.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Detailed information about a failed object download within a folder transfer
#[non_exhaustive]
#[derive(Debug)]
pub struct FailedDownload {
    pub(crate) object: RemoteObject,
    pub(crate) error: crate::error::Error,
}

impl FailedDownload {
    /// The object that failed to download
    pub fn object(&self) -> &RemoteObject {
        &self.object
    }

    /// The error encountered downloading the object
    pub fn error(&self) -> &crate::error::Error {
        &self.error
    }
}
