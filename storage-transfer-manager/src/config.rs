/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Config loading from the environment
pub mod loader;

use crate::types::ConcurrencySetting;

/// Configuration for a [`Client`](crate::client::Client)
///
/// The object store client is injected here explicitly; operations never
/// consult ambient process state to discover it.
#[derive(Debug, Clone)]
pub struct Config {
    concurrency: ConcurrencySetting,
    client: aws_sdk_s3::client::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the concurrency setting to use for folder download operations.
    pub fn concurrency(&self) -> &ConcurrencySetting {
        &self.concurrency
    }

    /// The object store client instance that will be used to send requests.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    concurrency: ConcurrencySetting,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set the concurrency level folder downloads are allowed to use.
    ///
    /// This sets the maximum number of per-object downloads in flight at once.
    /// Default is [ConcurrencySetting::Auto].
    pub fn concurrency(mut self, concurrency: ConcurrencySetting) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set an explicit object store client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Config {
        Config {
            concurrency: self.concurrency,
            client: self.client.expect("client set"),
        }
    }
}
