use std::iter::FusedIterator;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use super::types::LlmResultChunk;

/// One-shot sequence of response chunks.
///
/// Chunks are materialised up front; consumers pull them either as an
/// [`Iterator`] or as a [`Stream`]. Dropping it early releases nothing but
/// the remaining chunks.
#[derive(Debug)]
pub struct ChunkStream {
    chunks: std::vec::IntoIter<LlmResultChunk>,
}

impl ChunkStream {
    pub fn new(chunks: Vec<LlmResultChunk>) -> Self {
        Self {
            chunks: chunks.into_iter(),
        }
    }

    /// Remaining chunks not yet pulled.
    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

impl Iterator for ChunkStream {
    type Item = LlmResultChunk;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for ChunkStream {}

impl FusedIterator for ChunkStream {}

impl Stream for ChunkStream {
    type Item = LlmResultChunk;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().chunks.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}
