/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::{Arc, Mutex};
use std::time::Duration;

use aws_sdk_s3::operation::get_object::GetObjectOutput;
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
use aws_smithy_runtime_api::{client::orchestrator::HttpResponse, http::StatusCode};
use bytes::Bytes;

use storage_transfer_manager::cancel::CancellationToken;
use storage_transfer_manager::error::ErrorKind;
use storage_transfer_manager::types::{CancelledBy, DownloadDestination};

/// Transfer manager client backed by a mock store serving `key` with `data`
fn client_with_object(key: &'static str, data: Bytes) -> storage_transfer_manager::Client {
    let content_length = data.len() as i64;
    let get_object_rule = mock!(aws_sdk_s3::Client::get_object)
        .match_requests(move |r| r.key() == Some(key))
        .then_output(move || {
            GetObjectOutput::builder()
                .body(ByteStream::from(data.clone()))
                .content_length(content_length)
                .build()
        });

    let rules = vec![get_object_rule];
    let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules.as_slice());
    let config = storage_transfer_manager::Config::builder()
        .client(s3_client)
        .build();
    storage_transfer_manager::Client::new(config)
}

/// Transfer manager client whose store fails every `GetObject` call
fn client_with_broken_store() -> storage_transfer_manager::Client {
    let get_object_rule = mock!(aws_sdk_s3::Client::get_object).then_http_response(|| {
        HttpResponse::new(StatusCode::try_from(500).unwrap(), Bytes::new().into())
    });

    let rules = vec![get_object_rule];
    let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules.as_slice());
    let config = storage_transfer_manager::Config::builder()
        .client(s3_client)
        .build();
    storage_transfer_manager::Client::new(config)
}

/// The buffered result must hold exactly the bytes the stream produced, even
/// when the advisory size hint is wrong.
#[tokio::test]
async fn test_buffer_holds_exact_stream_bytes() {
    let data = Bytes::from_static(b"hello transfer manager");
    let client = client_with_object("notes/readme.txt", data.clone());

    let output = client
        .download()
        .container("test-container")
        .key("notes/readme.txt")
        .size_hint(3)
        .send()
        .await
        .unwrap();

    assert_eq!(data.len() as u64, output.bytes_transferred());
    let body = output.into_body().expect("in-memory download");
    assert_eq!(data.as_ref(), body.to_vec().as_slice());
}

/// File-mode downloads must produce a file whose content equals the stream's bytes.
#[tokio::test]
async fn test_file_content_equals_stream_bytes() {
    let data: Bytes = (0..=255u8).collect::<Vec<u8>>().into();
    let client = client_with_object("blobs/data.bin", data.clone());

    let dest = tempfile::tempdir().unwrap();
    let path = dest.path().join("data.bin");

    let output = client
        .download()
        .container("test-container")
        .key("blobs/data.bin")
        .destination(path.clone())
        .send()
        .await
        .unwrap();

    assert_eq!(Some(path.as_path()), output.destination());
    assert!(output.body().is_none());
    assert_eq!(data.len() as u64, output.bytes_transferred());

    let written = std::fs::read(&path).unwrap();
    assert_eq!(data.as_ref(), written.as_slice());
}

#[tokio::test]
async fn test_service_error_carries_object_context() {
    let client = client_with_broken_store();

    let err = client
        .download()
        .container("test-container")
        .key("blobs/data.bin")
        .send()
        .await
        .unwrap_err();

    match err.kind() {
        ErrorKind::DownloadFailed(ctx) => {
            assert_eq!("test-container", ctx.container());
            assert_eq!("blobs/data.bin", ctx.key());
            assert_eq!(None, ctx.destination());
        }
        other => panic!("expected DownloadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_file_mode_error_context_includes_destination() {
    let client = client_with_broken_store();

    let dest = tempfile::tempdir().unwrap();
    let path = dest.path().join("data.bin");

    let err = client
        .download()
        .container("test-container")
        .key("blobs/data.bin")
        .destination(path.clone())
        .send()
        .await
        .unwrap_err();

    match err.kind() {
        ErrorKind::DownloadFailed(ctx) => {
            assert_eq!(Some(path.as_path()), ctx.destination());
        }
        other => panic!("expected DownloadFailed, got {other:?}"),
    }
    assert!(!path.exists());
}

/// A token cancelled before the download starts fails the operation without
/// touching the filesystem.
#[tokio::test]
async fn test_cancelled_before_start() {
    let client = client_with_object("notes/readme.txt", Bytes::from_static(b"data"));

    let token = CancellationToken::new();
    token.cancel(CancelledBy::User);

    let dest = tempfile::tempdir().unwrap();
    let path = dest.path().join("readme.txt");

    let err = client
        .download()
        .container("test-container")
        .key("notes/readme.txt")
        .destination(path.clone())
        .cancellation_token(token)
        .send()
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorKind::OperationCancelled(CancelledBy::User)
    ));
    assert_eq!(Some(&CancelledBy::User), err.cancelled_by());
    assert!(!path.exists());
}

/// Cancelling mid-stream fails the operation with a cancellation error and no
/// partial file is left behind.
#[tokio::test]
async fn test_cancelled_mid_stream_removes_partial_file() {
    let client = client_with_object("blobs/data.bin", Bytes::from_static(b"partial content"));

    let token = CancellationToken::new();
    let cancel_on_progress = token.clone();

    let dest = tempfile::tempdir().unwrap();
    let path = dest.path().join("data.bin");

    let err = client
        .download()
        .container("test-container")
        .key("blobs/data.bin")
        .destination(path.clone())
        .cancellation_token(token)
        .progress_sink(move |_update| cancel_on_progress.cancel(CancelledBy::User))
        .send()
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        ErrorKind::OperationCancelled(CancelledBy::User)
    ));
    assert!(!path.exists(), "partial file should have been removed");
}

/// A timeout-armed token cancels with the timeout's identity so it remains
/// distinguishable from a user abort.
#[tokio::test]
async fn test_timeout_cancellation_tagged_with_identity() {
    let client = client_with_object("notes/readme.txt", Bytes::from_static(b"data"));

    let token = CancellationToken::with_timeout(Duration::from_millis(5), "fetch-deadline");
    token.cancelled().await;

    let err = client
        .download()
        .container("test-container")
        .key("notes/readme.txt")
        .cancellation_token(token)
        .send()
        .await
        .unwrap_err();

    match err.cancelled_by() {
        Some(CancelledBy::Timeout(id)) => assert_eq!("fetch-deadline", id),
        other => panic!("expected timeout cancellation, got {other:?}"),
    }
}

/// Progress observed through the sink is monotonically non-decreasing and
/// ends at 100 when the hint is accurate.
#[tokio::test]
async fn test_progress_reported_through_sink() {
    let data = Bytes::from_static(b"0123456789");
    let client = client_with_object("notes/readme.txt", data.clone());

    let updates: Arc<Mutex<Vec<(u64, Option<u8>)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_updates = updates.clone();

    let output = client
        .download()
        .container("test-container")
        .key("notes/readme.txt")
        .progress_sink(move |update: storage_transfer_manager::progress::ProgressUpdate| {
            sink_updates
                .lock()
                .unwrap()
                .push((update.bytes_transferred(), update.percent()));
        })
        .send()
        .await
        .unwrap();

    assert_eq!(data.len() as u64, output.bytes_transferred());

    let updates = updates.lock().unwrap();
    assert!(!updates.is_empty());

    let mut last_percent = 0u8;
    for (_, percent) in updates.iter() {
        let percent = percent.expect("content length known");
        assert!(percent >= last_percent);
        last_percent = percent;
    }
    assert_eq!(100, last_percent);
    assert_eq!(data.len() as u64, updates.last().unwrap().0);
}

/// In-memory is the default destination
#[tokio::test]
async fn test_defaults_to_in_memory_destination() {
    let client = client_with_object("notes/readme.txt", Bytes::from_static(b"data"));

    let builder = client.download();
    assert!(matches!(
        builder.get_destination(),
        DownloadDestination::InMemory
    ));

    let output = builder
        .container("test-container")
        .key("notes/readme.txt")
        .send()
        .await
        .unwrap();

    assert!(output.body().is_some());
    assert!(output.destination().is_none());
}
