/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::CancelledBy;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of transfer errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Operation input validation issues
    InputInvalid,

    /// I/O errors
    IOError,

    /// Some kind of internal runtime issue (e.g. task failure, poisoned mutex, etc)
    RuntimeError,

    /// Resource not found (e.g. container or key not found)
    NotFound,

    /// A service call unrelated to a particular object failed (e.g. listing a folder)
    ServiceError,

    /// Failed to download an object. Carries the identity of the object and,
    /// for file-mode downloads, the destination path.
    DownloadFailed(ObjectContext),

    /// The operation was cancelled before it completed, either by the user or
    /// by an armed timeout.
    OperationCancelled(CancelledBy),
}

/// Diagnostic context identifying the object a failed download was for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectContext {
    container: String,
    key: String,
    destination: Option<PathBuf>,
}

impl ObjectContext {
    pub(crate) fn new(
        container: impl Into<String>,
        key: impl Into<String>,
        destination: Option<PathBuf>,
    ) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
            destination,
        }
    }

    /// The container the object was being downloaded from
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The key of the object that failed to download
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The local destination path, for file-mode downloads
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }
}

impl Error {
    /// Creates a new transfer [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The agent that cancelled the operation, if this error represents a cancellation.
    pub fn cancelled_by(&self) -> Option<&CancelledBy> {
        match &self.kind {
            ErrorKind::OperationCancelled(by) => Some(by),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::IOError => write!(f, "I/O error"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::ServiceError => write!(f, "service call failed"),
            ErrorKind::DownloadFailed(ctx) => match ctx.destination() {
                Some(dest) => write!(
                    f,
                    "failed to download {}/{} to {}",
                    ctx.container(),
                    ctx.key(),
                    dest.display()
                ),
                None => write!(f, "failed to download {}/{}", ctx.container(), ctx.key()),
            },
            ErrorKind::OperationCancelled(by) => write!(f, "operation cancelled by {by}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error
where
    T: Send + Sync + 'static,
{
    fn from(value: std::sync::PoisonError<T>) -> Self {
        Self::new(ErrorKind::RuntimeError, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn download_failed<E>(ctx: ObjectContext, err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::DownloadFailed(ctx), err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NotFound" | "NoSuchKey" | "NoSuchBucket") => ErrorKind::NotFound,
            _ => ErrorKind::ServiceError,
        };

        Error::new(kind, value)
    }
}

static CANCELLATION_ERROR: &str = "the operation was cancelled before it completed";

pub(crate) fn operation_cancelled(by: CancelledBy) -> Error {
    Error::new(ErrorKind::OperationCancelled(by), CANCELLATION_ERROR)
}
