/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use reqwest::Response;
use url::Url;

use crate::error::AgentClientError;
use crate::types::{CreateDevfileRequest, CreateDevfileResponse, EnvironmentStatus, StartOptions};

/// Loopback port the agent listens on unless configured otherwise
pub const DEFAULT_AGENT_PORT: u16 = 1339;

/// Configuration for an [`AgentClient`].
///
/// The agent's port is injected here explicitly; the client never consults
/// ambient process state to discover it.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    port: u16,
}

impl AgentConfig {
    /// Create a config targeting an agent on the given loopback port.
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// The loopback port the agent listens on
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_PORT)
    }
}

/// Client for the local dev-environment agent.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AgentClient {
    /// Create a new client from an agent config.
    pub fn new(config: AgentConfig) -> Self {
        let base_url = Url::parse(&format!("http://127.0.0.1:{}/", config.port()))
            // a loopback authority with a numeric port always parses
            .expect("valid loopback base url");
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            // endpoint paths are static and relative
            .expect("valid endpoint path")
    }

    /// Start (or restart) the remote development environment.
    pub async fn start(&self, options: StartOptions) -> Result<(), AgentClientError> {
        let url = self.endpoint("start");
        tracing::debug!("requesting environment start from {url}");
        let resp = self.http.post(url).json(&options).send().await?;
        check_status(resp).await?;
        Ok(())
    }

    /// Create a devfile at `path`, returning the location the agent reports back.
    pub async fn create_devfile(
        &self,
        path: impl Into<String>,
    ) -> Result<String, AgentClientError> {
        let url = self.endpoint("devfile/create");
        let request = CreateDevfileRequest { path: path.into() };
        tracing::debug!("requesting devfile creation at '{}'", request.path);
        let resp = self.http.post(url).json(&request).send().await?;
        let resp = check_status(resp).await?;
        let parsed: CreateDevfileResponse = resp.json().await?;
        Ok(parsed.location)
    }

    /// Report the environment's current lifecycle status.
    pub async fn status(&self) -> Result<EnvironmentStatus, AgentClientError> {
        let url = self.endpoint("status");
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

async fn check_status(resp: Response) -> Result<Response, AgentClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::warn!("agent request failed with status {status}: {body}");
    Err(AgentClientError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    })
}
