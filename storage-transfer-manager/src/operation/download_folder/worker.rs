/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use async_channel::{Receiver, Sender};
use path_clean::PathClean;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use crate::error::{self, ErrorKind};
use crate::operation::download::{Download, DownloadInput};
use crate::operation::DEFAULT_DELIMITER;
use crate::types::{FailedDownload, RemoteObject};

use super::list::ListFolderStream;
use super::DownloadFolderContext;

#[derive(Debug)]
pub(super) struct DownloadFolderJob {
    object: RemoteObject,
}

impl DownloadFolderJob {
    /// Get the input used to download this object
    pub(super) fn input(&self, ctx: &DownloadFolderContext) -> Result<DownloadInput, error::Error> {
        let key_path = local_key_path(
            &ctx.state().destination,
            self.object.key(),
            ctx.state().input.prefix(),
        )?;

        let input = DownloadInput::builder()
            .container(self.object.container())
            .key(self.object.key())
            .size_hint(self.object.size_bytes())
            .destination(key_path)
            .cancellation_token(ctx.state().cancel.clone())
            .build()?;

        Ok(input)
    }
}

/// A folder marker is a 0-byte object whose key ends with the delimiter,
/// created when a folder is made explicitly in a storage console.
fn is_folder_marker(object: &RemoteObject) -> bool {
    object.key().ends_with(DEFAULT_DELIMITER) && object.size_bytes() == 0
}

// worker to enumerate objects under the folder prefix
pub(super) async fn discover_objects(
    ctx: DownloadFolderContext,
    work_tx: Sender<DownloadFolderJob>,
) -> Result<(), error::Error> {
    let mut stream = ListFolderStream::new(ctx.clone());
    let cancel = ctx.state().cancel.clone();

    loop {
        // never pick up more work once the signal has fired
        if let Some(by) = cancel.cancelled_by() {
            tracing::error!("received cancellation signal, exiting and not listing new objects");
            return Err(error::operation_cancelled(by));
        }
        tokio::select! {
            by = cancel.cancelled() => {
                tracing::error!("received cancellation signal, exiting and not listing new objects");
                return Err(error::operation_cancelled(by));
            }
            obj_result = stream.next() => {
                match obj_result {
                    None => break,
                    Some(obj_result) => {
                        let object = obj_result?;

                        if is_folder_marker(&object) {
                            tracing::debug!("skipping folder marker object: {:?}", object.key());
                            continue;
                        }

                        let job = DownloadFolderJob { object };
                        if work_tx.send(job).await.is_err() {
                            tracing::error!("all receiver ends have been dropped, unable to send a job!");
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

// worker to download an object
pub(super) async fn download_objects(
    ctx: DownloadFolderContext,
    work_rx: Receiver<DownloadFolderJob>,
) -> Result<(), error::Error> {
    let cancel = ctx.state().cancel.clone();
    loop {
        // never pick up more work once the signal has fired
        if let Some(by) = cancel.cancelled_by() {
            tracing::error!("received cancellation signal, exiting and not downloading a new object");
            return Err(error::operation_cancelled(by));
        }
        tokio::select! {
            by = cancel.cancelled() => {
                tracing::error!("received cancellation signal, exiting and not downloading a new object");
                return Err(error::operation_cancelled(by));
            }
            job = work_rx.recv() => {
                match job {
                    Err(_) => break,
                    Ok(job) => {
                        tracing::debug!(
                            "worker recv'd request for key {:?} ({:?} bytes)",
                            job.object.key(),
                            job.object.size_bytes()
                        );

                        let dl_result = download_single_obj(&ctx, &job).await;
                        match dl_result {
                            Ok(bytes_transferred) => {
                                ctx.state()
                                    .successful_downloads
                                    .fetch_add(1, Ordering::SeqCst);

                                ctx.state()
                                    .total_bytes_transferred
                                    .fetch_add(bytes_transferred, Ordering::SeqCst);

                                tracing::debug!("worker finished downloading key {:?}", job.object.key());
                            }
                            // batch cancellation settles every worker; it is not a per-object failure
                            Err(err) if matches!(err.kind(), ErrorKind::OperationCancelled(_)) => {
                                return Err(err);
                            }
                            Err(err) => {
                                tracing::debug!(
                                    "worker failed to download key {:?}: {}",
                                    job.object.key(),
                                    err
                                );

                                let failed_transfer = FailedDownload {
                                    object: job.object,
                                    error: err,
                                };

                                ctx.record_failure(failed_transfer);
                            }
                        }
                    }
                }
            }
        }
    }

    tracing::trace!("req channel closed, worker finished");
    Ok(())
}

async fn download_single_obj(
    ctx: &DownloadFolderContext,
    job: &DownloadFolderJob,
) -> Result<u64, error::Error> {
    let input = job.input(ctx)?;
    let output = Download::orchestrate(ctx.handle().clone(), input).await?;
    Ok(output.bytes_transferred())
}

/// If the prefix is not empty AND the key contains the delimiter, strip the prefix from the key.
///
/// # Examples
///
/// ```ignore
/// let actual = strip_key_prefix("notes/2021/1.txt", Some("notes/2021/"));
/// assert_eq!("1.txt", actual);
///
/// // If the prefix is not the full name of the folder, the folder name will be truncated.
/// let actual = strip_key_prefix("top-level/sub-folder/1.txt", Some("top-"));
/// assert_eq!("level/sub-folder/1.txt", actual);
/// ```
///
pub(super) fn strip_key_prefix<'a>(key: &'a str, prefix: Option<&str>) -> &'a str {
    let prefix = prefix.unwrap_or("");
    let delim = DEFAULT_DELIMITER;

    if key.is_empty() || prefix.is_empty() || !key.starts_with(prefix) || !key.contains(delim) {
        return key;
    }

    let stripped = &key[prefix.len()..];

    if prefix.ends_with(delim) || !stripped.starts_with(delim) {
        return stripped;
    }

    &stripped[1..]
}

/// Replace the key delimiter when it does not match the platform path separator
fn replace_delim(key: &str) -> Cow<'_, str> {
    if DEFAULT_DELIMITER == std::path::MAIN_SEPARATOR_STR {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(key.replace(DEFAULT_DELIMITER, std::path::MAIN_SEPARATOR_STR))
    }
}

/// Derive the local path for a given object key
fn local_key_path(
    root_dir: &Path,
    key: &str,
    prefix: Option<&str>,
) -> Result<PathBuf, error::Error> {
    let stripped = strip_key_prefix(key, prefix);
    let relative_path = replace_delim(stripped);

    let local_path = root_dir.join(relative_path.as_ref()).clean();
    validate_path(root_dir, &local_path, key)?;

    Ok(local_path)
}

fn validate_path(root_dir: &Path, local_path: &Path, key: &str) -> Result<(), error::Error> {
    // validate the resolved key path doesn't resolve outside the destination directory
    if !local_path.starts_with(root_dir) {
        let err = error::Error::new(error::ErrorKind::InputInvalid, format!("Unable to download key: '{key}', it's relative path resolves outside the target destination directory"));
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::operation::download_folder::{DownloadFolderContext, DownloadFolderInput};

    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
    use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};

    use std::path::PathBuf;

    struct ObjectKeyPathTest {
        key: &'static str,
        prefix: Option<&'static str>,
        expected: Result<&'static str, &'static str>,
    }

    fn success_path_test(
        key: &'static str,
        prefix: Option<&'static str>,
        expected: &'static str,
    ) -> ObjectKeyPathTest {
        ObjectKeyPathTest {
            key,
            prefix,
            expected: Ok(expected),
        }
    }

    // we only use this on linux so windows only test complains
    #[allow(dead_code)]
    fn error_path_test(
        key: &'static str,
        prefix: Option<&'static str>,
        expected_err: &'static str,
    ) -> ObjectKeyPathTest {
        ObjectKeyPathTest {
            key,
            prefix,
            expected: Err(expected_err),
        }
    }

    #[test]
    fn test_strip_key_prefix() {
        let tests = &[
            success_path_test("no-delim", None, "no-delim"),
            success_path_test("no-delim", Some(""), "no-delim"),
            success_path_test("delim/with/separator", Some(""), "delim/with/separator"),
            success_path_test("", Some("no-delim"), ""),
            success_path_test("no-delim", Some("no-delim"), "no-delim"),
            success_path_test("delim/", Some("delim"), ""),
            success_path_test("not-in-key", Some("prefix"), "not-in-key"),
            success_path_test("notes/2021/1.txt", Some("notes/2021"), "1.txt"),
            success_path_test("notes/2021/1.txt", Some("notes/2021/"), "1.txt"),
            success_path_test(
                "top-level/sub-folder/1.txt",
                Some("top-"),
                "level/sub-folder/1.txt",
            ),
            success_path_test(
                "someInnerFolder/another/file1.txt",
                Some("someInner"),
                "Folder/another/file1.txt",
            ),
            success_path_test(
                "someInner/another/file1.txt",
                Some("someInner"),
                "another/file1.txt",
            ),
        ];

        for test in tests {
            let actual = strip_key_prefix(test.key, test.prefix);
            assert_eq!(*test.expected.as_ref().unwrap(), actual);
        }
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn test_local_key_path_linux() {
        use aws_sdk_s3::error::DisplayErrorContext;

        let tests = &[
            success_path_test("2023/Jan/1.png", None, "test/2023/Jan/1.png"),
            success_path_test("2023/Jan/1.png", Some("2023/Jan/"), "test/1.png"),
            success_path_test("2023/Jan/1.png", Some("2023/Jan"), "test/1.png"),
            // resolves outside parent folder
            error_path_test("../2023/Jan/1.png", None, "Unable to download key: '../2023/Jan/1.png'"),
            error_path_test("/2023/Jan/1.png", None, "Unable to download key: '/2023/Jan/1.png'"),
            error_path_test(
                "foo/../2023/../../Jan/1.png",
                None,
                "Unable to download key: 'foo/../2023/../../Jan/1.png'",
            ),
            error_path_test(
                "../test-2/object.dat",
                None,
                "Unable to download key: '../test-2/object.dat'",
            ),
        ];

        for test in tests {
            let root_dir = PathBuf::from("test");
            let actual = local_key_path(&root_dir, test.key, test.prefix);
            if test.expected.is_ok() {
                let actual = actual.expect("expected success");
                let actual_str = actual.to_str().expect("valid utf-8 path");
                assert_eq!(*test.expected.as_ref().unwrap(), actual_str);
            } else {
                let err =
                    actual.expect_err("path resolves outside of parent folder, expected error");
                let actual_err = format!("{}", DisplayErrorContext(err));
                let expected_err_substr = test.expected.as_ref().unwrap_err();
                assert!(
                    actual_err.contains(expected_err_substr),
                    "'{actual_err}' does not contain '{expected_err_substr}'"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_skip_folder_marker_objects() {
        let list_objects_rule = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
            ListObjectsV2Output::builder()
                .contents(
                    aws_sdk_s3::types::Object::builder()
                        .key("key1")
                        .size(10)
                        .build(),
                )
                .contents(
                    aws_sdk_s3::types::Object::builder()
                        .key("key2")
                        .size(0)
                        .build(),
                )
                .contents(
                    aws_sdk_s3::types::Object::builder()
                        .key("folder/")
                        .size(0)
                        .build(),
                )
                .build()
        });

        let rules = vec![list_objects_rule];
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules.as_slice());
        let config = crate::Config::builder().client(s3_client).build();
        let client = crate::Client::new(config);
        let input = DownloadFolderInput::builder()
            .container("test-container")
            .destination("/tmp/test")
            .build()
            .unwrap();

        let ctx = DownloadFolderContext::new(client.handle.clone(), input, "/tmp/test".into());

        let (work_tx, work_rx) = async_channel::unbounded();

        let join_handle = tokio::spawn(discover_objects(ctx, work_tx));

        let mut keys = Vec::new();

        while let Ok(job) = work_rx.recv().await {
            keys.push(job.object.key().to_owned());
        }

        join_handle.await.unwrap().unwrap();

        assert_eq!(keys, vec!["key1", "key2"]);
    }

    #[tokio::test]
    async fn test_discovery_stops_when_cancelled() {
        let list_objects_rule = mock!(aws_sdk_s3::Client::list_objects_v2).then_output(|| {
            ListObjectsV2Output::builder()
                .contents(
                    aws_sdk_s3::types::Object::builder()
                        .key("key1")
                        .size(10)
                        .build(),
                )
                .build()
        });

        let rules = vec![list_objects_rule];
        let s3_client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules.as_slice());
        let config = crate::Config::builder().client(s3_client).build();
        let client = crate::Client::new(config);

        let token = crate::cancel::CancellationToken::new();
        token.cancel(crate::types::CancelledBy::User);

        let input = DownloadFolderInput::builder()
            .container("test-container")
            .destination("/tmp/test")
            .cancellation_token(token)
            .build()
            .unwrap();

        let ctx = DownloadFolderContext::new(client.handle.clone(), input, "/tmp/test".into());

        let (work_tx, _work_rx) = async_channel::unbounded::<DownloadFolderJob>();

        let err = discover_objects(ctx, work_tx).await.unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::OperationCancelled(crate::types::CancelledBy::User)
        ));
    }
}
