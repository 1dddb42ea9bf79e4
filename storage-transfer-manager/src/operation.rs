/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

/// Types for single object download operation
pub mod download;

/// Types for folder download operation
pub mod download_folder;

/// Delimiter separating folder components in object keys
pub(crate) const DEFAULT_DELIMITER: &str = "/";

/// Container for maintaining context required to carry out a single operation/transfer.
///
/// `State` is whatever additional operation specific state is required for the operation.
#[derive(Debug)]
pub(crate) struct TransferContext<State> {
    handle: Arc<crate::client::Handle>,
    state: Arc<State>,
}

impl<State> TransferContext<State> {
    pub(crate) fn from_state(handle: Arc<crate::client::Handle>, state: State) -> Self {
        Self {
            handle,
            state: Arc::new(state),
        }
    }

    /// The object store client to use for service operations
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.handle.config.client()
    }

    /// The client handle used to carry out work
    pub(crate) fn handle(&self) -> &Arc<crate::client::Handle> {
        &self.handle
    }

    /// Operation specific state
    pub(crate) fn state(&self) -> &State {
        &self.state
    }
}

impl<State> Clone for TransferContext<State> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            state: self.state.clone(),
        }
    }
}
