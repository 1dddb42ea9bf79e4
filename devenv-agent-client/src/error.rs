/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use thiserror::Error;

/// Errors returned by the dev-environment agent client
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgentClientError {
    /// Transport-level failure, or a response body that could not be decoded
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The agent answered with a non-success status
    #[error("agent returned unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code of the response
        status: u16,
        /// Response body, as text, for diagnostics
        body: String,
    },
}
