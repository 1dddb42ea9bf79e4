/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
pub use input::{DownloadInput, DownloadInputBuilder};
mod output;
pub use output::{DownloadOutput, DownloadOutputBuilder};

use std::path::Path;
use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::cancel::CancellationToken;
use crate::error::{self, ObjectContext};
use crate::io::AggregatedBytes;
use crate::progress::ProgressTracker;
use crate::types::DownloadDestination;

/// Operation struct for downloading a single object
#[derive(Clone, Default, Debug)]
pub(crate) struct Download;

impl Download {
    /// Execute a single `Download` transfer operation
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DownloadInput,
    ) -> Result<DownloadOutput, error::Error> {
        let container = input.container().expect("container set").to_owned();
        let key = input.key().expect("key set").to_owned();
        let ctx = ObjectContext::new(
            container.clone(),
            key.clone(),
            input.destination().local_path().map(Path::to_path_buf),
        );

        // a token cancelled before we start never issues the service call
        if let Some(by) = input.cancellation().and_then(CancellationToken::cancelled_by) {
            tracing::debug!("download of {container}/{key} cancelled before start");
            return Err(error::operation_cancelled(by));
        }

        tracing::debug!("starting download of {container}/{key}");

        let resp = handle
            .config
            .client()
            .get_object()
            .bucket(&container)
            .key(&key)
            .send()
            .await
            .map_err(|err| error::download_failed(ctx.clone(), err))?;

        let size_hint = input
            .size_hint()
            .or_else(|| resp.content_length().and_then(|len| u64::try_from(len).ok()));
        let mut tracker = ProgressTracker::new(size_hint);
        let mut body = resp.body;

        match input.destination() {
            DownloadDestination::InMemory => {
                let data = collect_stream(&mut body, &ctx, &input, &mut tracker).await?;
                let bytes_transferred = data.len() as u64;
                tracing::debug!("finished download of {container}/{key} ({bytes_transferred} bytes buffered)");
                Ok(DownloadOutput::builder()
                    .bytes_transferred(bytes_transferred)
                    .body(data)
                    .build())
            }
            DownloadDestination::LocalFile(path) => {
                let path = path.clone();
                match write_stream(&mut body, &path, &ctx, &input, &mut tracker).await {
                    Ok(bytes_transferred) => {
                        tracing::debug!(
                            "finished download of {container}/{key} to {} ({bytes_transferred} bytes)",
                            path.display()
                        );
                        Ok(DownloadOutput::builder()
                            .bytes_transferred(bytes_transferred)
                            .destination(path)
                            .build())
                    }
                    Err(err) => {
                        // a partially written file is removed rather than left behind
                        let _ = fs::remove_file(&path).await;
                        Err(err)
                    }
                }
            }
        }
    }
}

/// Pull the next chunk off the stream, or fail if the token fires first.
///
/// Dropping the stream after an error here is what tears the in-flight
/// connection down.
async fn next_chunk(
    body: &mut ByteStream,
    cancellation: Option<&CancellationToken>,
) -> Result<Option<Result<Bytes, aws_smithy_types::byte_stream::error::Error>>, error::Error> {
    match cancellation {
        Some(token) => {
            // never consume another chunk once the signal has fired
            if let Some(by) = token.cancelled_by() {
                return Err(error::operation_cancelled(by));
            }
            tokio::select! {
                by = token.cancelled() => Err(error::operation_cancelled(by)),
                chunk = body.next() => Ok(chunk),
            }
        }
        None => Ok(body.next().await),
    }
}

fn record_progress(input: &DownloadInput, tracker: &mut ProgressTracker, delta: usize) {
    let update = tracker.record(delta as u64);
    if let Some(sink) = input.progress_sink() {
        sink.notify(update);
    }
}

async fn collect_stream(
    body: &mut ByteStream,
    ctx: &ObjectContext,
    input: &DownloadInput,
    tracker: &mut ProgressTracker,
) -> Result<AggregatedBytes, error::Error> {
    let mut data = AggregatedBytes::new();
    while let Some(chunk) = next_chunk(body, input.cancellation()).await? {
        let chunk = chunk.map_err(|err| error::download_failed(ctx.clone(), err))?;
        record_progress(input, tracker, chunk.len());
        data.push(chunk);
    }
    Ok(data)
}

async fn write_stream(
    body: &mut ByteStream,
    path: &Path,
    ctx: &ObjectContext,
    input: &DownloadInput,
    tracker: &mut ProgressTracker,
) -> Result<u64, error::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| error::download_failed(ctx.clone(), err))?;
        }
    }

    let mut dest = fs::File::create(path)
        .await
        .map_err(|err| error::download_failed(ctx.clone(), err))?;

    let mut bytes_transferred: u64 = 0;
    while let Some(chunk) = next_chunk(body, input.cancellation()).await? {
        let chunk = chunk.map_err(|err| error::download_failed(ctx.clone(), err))?;
        record_progress(input, tracker, chunk.len());
        bytes_transferred += chunk.len() as u64;
        dest.write_all(&chunk)
            .await
            .map_err(|err| error::download_failed(ctx.clone(), err))?;
    }

    dest.flush()
        .await
        .map_err(|err| error::download_failed(ctx.clone(), err))?;

    Ok(bytes_transferred)
}
