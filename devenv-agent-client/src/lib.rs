/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Client for the local dev-environment agent.
//!
//! The agent is a sidecar HTTP service on a fixed loopback port that manages
//! the lifecycle of a remote development environment. It exposes three
//! JSON-over-HTTP endpoints, treated here as a fixed external contract:
//! no retry, no auth, no versioning.
//!
//! * `POST /start` - start (or restart) the environment
//! * `POST /devfile/create` - create a devfile at a path, returning its location
//! * `GET /status` - report whether the environment is pending, stable, or changed
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), devenv_agent_client::AgentClientError> {
//! use devenv_agent_client::{AgentClient, AgentConfig, StartOptions};
//!
//! let client = AgentClient::new(AgentConfig::default());
//!
//! let status = client.status().await?;
//! println!("environment is {:?}", status.status);
//!
//! client
//!     .start(StartOptions {
//!         location: "/projects/demo".into(),
//!         recreate_home_volumes: false,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{AgentClient, AgentConfig, DEFAULT_AGENT_PORT};
pub use error::AgentClientError;
pub use types::{EnvironmentState, EnvironmentStatus, StartOptions};
