/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use crate::io::AggregatedBytes;

/// Output type for downloading a single object
#[non_exhaustive]
#[derive(Debug)]
pub struct DownloadOutput {
    /// The number of bytes received from the object's stream
    pub bytes_transferred: u64,

    /// The object content, for in-memory downloads
    pub body: Option<AggregatedBytes>,

    /// The local path the object was written to, for file-mode downloads
    pub destination: Option<PathBuf>,
}

impl DownloadOutput {
    /// Creates a new builder-style object to manufacture [`DownloadOutput`](crate::operation::download::DownloadOutput).
    pub fn builder() -> DownloadOutputBuilder {
        DownloadOutputBuilder::default()
    }

    /// The number of bytes received from the object's stream
    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred
    }

    /// The object content, for in-memory downloads
    pub fn body(&self) -> Option<&AggregatedBytes> {
        self.body.as_ref()
    }

    /// Consume the output and take the object content, for in-memory downloads
    pub fn into_body(self) -> Option<AggregatedBytes> {
        self.body
    }

    /// The local path the object was written to, for file-mode downloads
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }
}

/// A builder for [`DownloadOutput`](crate::operation::download::DownloadOutput).
#[non_exhaustive]
#[derive(Debug, Default)]
pub struct DownloadOutputBuilder {
    pub(crate) bytes_transferred: u64,
    pub(crate) body: Option<AggregatedBytes>,
    pub(crate) destination: Option<PathBuf>,
}

impl DownloadOutputBuilder {
    /// The number of bytes received from the object's stream
    pub fn bytes_transferred(mut self, input: u64) -> Self {
        self.bytes_transferred = input;
        self
    }

    /// The object content, for in-memory downloads
    pub fn body(mut self, input: AggregatedBytes) -> Self {
        self.body = Some(input);
        self
    }

    /// The object content, for in-memory downloads
    pub fn set_body(mut self, input: Option<AggregatedBytes>) -> Self {
        self.body = input;
        self
    }

    /// The local path the object was written to, for file-mode downloads
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// The local path the object was written to, for file-mode downloads
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// Consume the builder and return the output
    pub fn build(self) -> DownloadOutput {
        DownloadOutput {
            bytes_transferred: self.bytes_transferred,
            body: self.body,
            destination: self.destination,
        }
    }
}
