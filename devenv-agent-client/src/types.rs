/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Wire types exchanged with the dev-environment agent.

use serde::{Deserialize, Serialize};

/// Request body for `POST /start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOptions {
    /// Location of the project the environment should start from
    pub location: String,

    /// Whether the environment's home volumes should be recreated on start
    pub recreate_home_volumes: bool,
}

/// Request body for `POST /devfile/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateDevfileRequest {
    pub(crate) path: String,
}

/// Response body for `POST /devfile/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateDevfileResponse {
    pub(crate) location: String,
}

/// Response body for `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStatus {
    /// Identifier of the action the agent is currently carrying out, if any
    #[serde(default)]
    pub action_id: Option<String>,

    /// Human readable detail accompanying the status, if any
    #[serde(default)]
    pub message: Option<String>,

    /// Current state of the environment
    pub status: EnvironmentState,
}

/// The lifecycle state reported by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvironmentState {
    /// The agent is still acting on the environment
    Pending,

    /// The environment matches its definition
    Stable,

    /// The environment's definition changed and a restart is required
    Changed,
}
