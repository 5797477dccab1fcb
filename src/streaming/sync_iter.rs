use std::fmt::Display;
use std::iter::FusedIterator;

use crate::error::{Result, StreamError};
use crate::models::chunk::GenericStreamingChunk;
use crate::streaming::frame::{FrameOptions, process_frame};
use crate::streaming::state::StreamState;

enum Source<T: IntoIterator> {
    Fresh(T),
    Active(T::IntoIter),
    Exhausted,
}

/// Blocking adapter from raw text frames to canonical chunks
///
/// The frame source is bound lazily on the first call to `next`. Transport
/// errors and upstream errors are yielded once, after which the iterator is
/// exhausted.
pub struct SyncChunkIterator<T: IntoIterator> {
    source: Source<T>,
    options: FrameOptions,
}

impl<T, E> SyncChunkIterator<T>
where
    T: IntoIterator<Item = std::result::Result<String, E>>,
    E: Display,
{
    pub fn new(frames: T) -> Self {
        Self::with_options(frames, FrameOptions::sync())
    }

    pub fn with_options(frames: T, options: FrameOptions) -> Self {
        Self {
            source: Source::Fresh(frames),
            options,
        }
    }

    pub fn state(&self) -> StreamState {
        match self.source {
            Source::Fresh(_) => StreamState::Fresh,
            Source::Active(_) => StreamState::Active,
            Source::Exhausted => StreamState::Exhausted,
        }
    }
}

impl<T, E> Iterator for SyncChunkIterator<T>
where
    T: IntoIterator<Item = std::result::Result<String, E>>,
    E: Display,
{
    type Item = Result<GenericStreamingChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        // stays Exhausted unless the frame is handled cleanly
        let mut frames = match std::mem::replace(&mut self.source, Source::Exhausted) {
            Source::Fresh(frames) => frames.into_iter(),
            Source::Active(frames) => frames,
            Source::Exhausted => return None,
        };

        let raw = match frames.next() {
            Some(Ok(raw)) => raw,
            Some(Err(e)) => return Some(Err(StreamError::TransportError(e.to_string()))),
            None => {
                tracing::debug!("Frame source exhausted");
                return None;
            }
        };

        match process_frame(&raw, &self.options) {
            Ok(outcome) => {
                let chunk = outcome.into_chunk()?;
                self.source = Source::Active(frames);
                Some(Ok(chunk))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl<T, E> FusedIterator for SyncChunkIterator<T>
where
    T: IntoIterator<Item = std::result::Result<String, E>>,
    E: Display,
{
}
