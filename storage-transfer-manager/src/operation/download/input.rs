/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use crate::cancel::CancellationToken;
use crate::progress::ProgressSink;
use crate::types::DownloadDestination;

/// Input type for downloading a single object
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DownloadInput {
    /// The container holding the object.
    pub container: Option<String>,

    /// The key of the object to download.
    pub key: Option<String>,

    /// Advisory total size of the object in bytes.
    ///
    /// Used to seed progress reporting; the actual byte count received may
    /// differ and is never truncated or capped to match the hint. When unset,
    /// the content length reported by the service is used instead.
    pub size_hint: Option<u64>,

    /// Where the downloaded bytes should end up. Defaults to an in-memory buffer.
    pub destination: DownloadDestination,

    /// Cooperative cancellation signal observed at every chunk boundary.
    pub cancellation: Option<CancellationToken>,

    /// Observer invoked with a progress update for every chunk received.
    pub progress_sink: Option<ProgressSink>,
}

impl DownloadInput {
    /// Creates a new builder-style object to manufacture [`DownloadInput`](crate::operation::download::DownloadInput).
    pub fn builder() -> DownloadInputBuilder {
        DownloadInputBuilder::default()
    }

    /// The container holding the object.
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// The key of the object to download.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Advisory total size of the object in bytes.
    pub fn size_hint(&self) -> Option<u64> {
        self.size_hint
    }

    /// Where the downloaded bytes should end up.
    pub fn destination(&self) -> &DownloadDestination {
        &self.destination
    }

    /// Cooperative cancellation signal observed at every chunk boundary.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Observer invoked with a progress update for every chunk received.
    pub fn progress_sink(&self) -> Option<&ProgressSink> {
        self.progress_sink.as_ref()
    }
}

/// A builder for [`DownloadInput`](crate::operation::download::DownloadInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct DownloadInputBuilder {
    pub(crate) container: Option<String>,
    pub(crate) key: Option<String>,
    pub(crate) size_hint: Option<u64>,
    pub(crate) destination: DownloadDestination,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) progress_sink: Option<ProgressSink>,
}

impl DownloadInputBuilder {
    /// Set the container holding the object to download.
    ///
    /// NOTE: A container is required.
    pub fn container(mut self, input: impl Into<String>) -> Self {
        self.container = Some(input.into());
        self
    }

    /// Set the container holding the object to download.
    ///
    /// NOTE: A container is required.
    pub fn set_container(mut self, input: Option<String>) -> Self {
        self.container = input;
        self
    }

    /// The container holding the object.
    pub fn get_container(&self) -> &Option<String> {
        &self.container
    }

    /// Set the key of the object to download.
    ///
    /// NOTE: A key is required.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.key = Some(input.into());
        self
    }

    /// Set the key of the object to download.
    ///
    /// NOTE: A key is required.
    pub fn set_key(mut self, input: Option<String>) -> Self {
        self.key = input;
        self
    }

    /// The key of the object to download.
    pub fn get_key(&self) -> &Option<String> {
        &self.key
    }

    /// Set the advisory total size of the object in bytes.
    pub fn size_hint(mut self, input: u64) -> Self {
        self.size_hint = Some(input);
        self
    }

    /// Set the advisory total size of the object in bytes.
    pub fn set_size_hint(mut self, input: Option<u64>) -> Self {
        self.size_hint = input;
        self
    }

    /// The advisory total size of the object in bytes.
    pub fn get_size_hint(&self) -> &Option<u64> {
        &self.size_hint
    }

    /// Set where the downloaded bytes should end up.
    pub fn destination(mut self, input: impl Into<DownloadDestination>) -> Self {
        self.destination = input.into();
        self
    }

    /// Set where the downloaded bytes should end up.
    pub fn set_destination(mut self, input: DownloadDestination) -> Self {
        self.destination = input;
        self
    }

    /// Where the downloaded bytes should end up.
    pub fn get_destination(&self) -> &DownloadDestination {
        &self.destination
    }

    /// Set the cancellation signal the download should observe.
    pub fn cancellation_token(mut self, input: CancellationToken) -> Self {
        self.cancellation = Some(input);
        self
    }

    /// Set the cancellation signal the download should observe.
    pub fn set_cancellation_token(mut self, input: Option<CancellationToken>) -> Self {
        self.cancellation = input;
        self
    }

    /// The cancellation signal the download should observe.
    pub fn get_cancellation_token(&self) -> &Option<CancellationToken> {
        &self.cancellation
    }

    /// Set the observer to invoke with progress updates.
    pub fn progress_sink(
        mut self,
        input: impl Fn(crate::progress::ProgressUpdate) + Send + Sync + 'static,
    ) -> Self {
        self.progress_sink = Some(ProgressSink::from(input));
        self
    }

    /// Set the observer to invoke with progress updates.
    pub fn set_progress_sink(mut self, input: Option<ProgressSink>) -> Self {
        self.progress_sink = input;
        self
    }

    /// The observer to invoke with progress updates.
    pub fn get_progress_sink(&self) -> &Option<ProgressSink> {
        &self.progress_sink
    }

    /// Consumes the builder and constructs a [`DownloadInput`](crate::operation::download::DownloadInput).
    pub fn build(self) -> Result<DownloadInput, BuildError> {
        if self.container.is_none() {
            return Err(BuildError::missing_field(
                "container",
                "A container is required",
            ));
        }

        if self.key.is_none() {
            return Err(BuildError::missing_field("key", "A key is required"));
        }

        Ok(DownloadInput {
            container: self.container,
            key: self.key,
            size_hint: self.size_hint,
            destination: self.destination,
            cancellation: self.cancellation,
            progress_sink: self.progress_sink,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DownloadInput;

    #[test]
    fn test_no_container_error() {
        let err = DownloadInput::builder().key("some-key").build().unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("A container is required"));
    }

    #[test]
    fn test_no_key_error() {
        let err = DownloadInput::builder()
            .container("some-container")
            .build()
            .unwrap_err();

        let err_string = err.to_string();
        assert!(err_string.contains("A key is required"));
    }
}
