/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::io::IoSlice;

use bytes::{Buf, Bytes};
use bytes_utils::SegmentedBuf;

///
/// Non-contiguous Binary Data Storage
///
/// When data is read from the network, it is read in a sequence of chunks that are not in
/// contiguous memory. [`AggregatedBytes`] provides a view of this data via
/// [`impl Buf`](bytes::Buf) or it can be copied into contiguous storage with
/// [`.into_bytes()`](AggregatedBytes::into_bytes).
///
/// Because chunks are appended as received, the buffer holds exactly the
/// bytes produced by the source stream regardless of any advisory size hint.
#[derive(Debug, Clone)]
pub struct AggregatedBytes(pub(crate) SegmentedBuf<Bytes>);

impl AggregatedBytes {
    /// Create a new empty buffer to aggregate a download into.
    pub(crate) fn new() -> Self {
        AggregatedBytes(SegmentedBuf::new())
    }

    /// Append a chunk received from the source stream.
    pub(crate) fn push(&mut self, chunk: Bytes) {
        self.0.push(chunk);
    }

    /// Number of bytes held by this buffer
    pub fn len(&self) -> usize {
        self.0.remaining()
    }

    /// Whether this buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.remaining() == 0
    }

    /// Convert this buffer into [`Bytes`].
    ///
    /// # Why does this consume `self`?
    /// Technically, [`copy_to_bytes`](bytes::Buf::copy_to_bytes) can be called without ownership of self. However, since this
    /// mutates the underlying buffer such that no data is remaining, it is more misuse resistant to
    /// prevent the caller from attempting to reread the buffer.
    ///
    /// If the caller only holds a mutable reference, they may use [`copy_to_bytes`](bytes::Buf::copy_to_bytes)
    /// directly on `AggregatedBytes`.
    pub fn into_bytes(mut self) -> Bytes {
        self.0.copy_to_bytes(self.0.remaining())
    }

    /// Convert this buffer into an [`Iterator`] of underlying non-contiguous segments of [`Bytes`]
    pub fn into_segments(self) -> impl Iterator<Item = Bytes> {
        self.0.into_inner().into_iter()
    }

    /// Convert this buffer into a `Vec<u8>`
    pub fn to_vec(self) -> Vec<u8> {
        self.0.into_inner().into_iter().flatten().collect()
    }
}

impl Buf for AggregatedBytes {
    // Forward all methods that SegmentedBuf has custom implementations of.
    fn remaining(&self) -> usize {
        self.0.remaining()
    }

    fn chunk(&self) -> &[u8] {
        self.0.chunk()
    }

    fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
        self.0.chunks_vectored(dst)
    }

    fn advance(&mut self, cnt: usize) {
        self.0.advance(cnt)
    }

    fn copy_to_bytes(&mut self, len: usize) -> Bytes {
        self.0.copy_to_bytes(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_exact_bytes_across_segments() {
        let mut buf = AggregatedBytes::new();
        buf.push(Bytes::from_static(b"hello "));
        buf.push(Bytes::from_static(b"world"));

        assert_eq!(11, buf.len());
        assert_eq!(b"hello world".as_slice(), buf.to_vec().as_slice());
    }

    #[test]
    fn test_into_segments_keeps_chunk_boundaries() {
        let mut buf = AggregatedBytes::new();
        buf.push(Bytes::from_static(b"ab"));
        buf.push(Bytes::from_static(b"cd"));

        let segments: Vec<Bytes> = buf.into_segments().collect();
        assert_eq!(
            vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")],
            segments
        );
    }
}
