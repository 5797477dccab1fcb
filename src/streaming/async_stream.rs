use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::FusedStream;
use futures::{Stream, StreamExt, ready};

use crate::error::{Result, StreamError};
use crate::models::chunk::GenericStreamingChunk;
use crate::streaming::frame::{FrameOptions, process_frame};
use crate::streaming::state::StreamState;

/// Async adapter from raw text frames to canonical chunks
///
/// The stream ends on source exhaustion or on the terminator sentinel,
/// whichever comes first. Polling only suspends inside the frame source.
pub struct AsyncChunkStream<S> {
    frames: S,
    state: StreamState,
    options: FrameOptions,
}

impl<S, E> AsyncChunkStream<S>
where
    S: Stream<Item = std::result::Result<String, E>> + Unpin,
    E: Display,
{
    pub fn new(frames: S) -> Self {
        Self::with_options(frames, FrameOptions::async_stream())
    }

    pub fn with_options(frames: S, options: FrameOptions) -> Self {
        Self {
            frames,
            state: StreamState::Fresh,
            options,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }
}

impl<S, E> Stream for AsyncChunkStream<S>
where
    S: Stream<Item = std::result::Result<String, E>> + Unpin,
    E: Display,
{
    type Item = Result<GenericStreamingChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.state == StreamState::Exhausted {
            return Poll::Ready(None);
        }
        this.state = StreamState::Active;

        let raw = match ready!(this.frames.poll_next_unpin(cx)) {
            Some(Ok(raw)) => raw,
            Some(Err(e)) => {
                this.state = StreamState::Exhausted;
                return Poll::Ready(Some(Err(StreamError::TransportError(e.to_string()))));
            }
            None => {
                tracing::debug!("Frame stream exhausted");
                this.state = StreamState::Exhausted;
                return Poll::Ready(None);
            }
        };

        let item = match process_frame(&raw, &this.options) {
            Ok(outcome) => outcome.into_chunk().map(Ok),
            Err(e) => Some(Err(e)),
        };

        if !matches!(item, Some(Ok(_))) {
            this.state = StreamState::Exhausted;
        }
        Poll::Ready(item)
    }
}

impl<S, E> FusedStream for AsyncChunkStream<S>
where
    S: Stream<Item = std::result::Result<String, E>> + Unpin,
    E: Display,
{
    fn is_terminated(&self) -> bool {
        self.state == StreamState::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::convert::Infallible;
    use tracing_test::traced_test;

    type Frames = stream::Iter<std::vec::IntoIter<std::result::Result<String, Infallible>>>;

    fn frames(raw: &[&str]) -> Frames {
        stream::iter(raw.iter().map(|s| Ok(s.to_string())).collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_terminator_ends_stream() {
        let mut chunks = AsyncChunkStream::new(frames(&[
            r#"data: {"choices":[{"delta":{"content":"a"}}]}"#,
            "data: [DONE]",
            r#"data: {"choices":[{"delta":{"content":"never"}}]}"#,
        ]));
        assert_eq!(chunks.state(), StreamState::Fresh);

        assert_eq!(chunks.next().await.unwrap().unwrap().text, "a");
        assert_eq!(chunks.state(), StreamState::Active);

        assert!(chunks.next().await.is_none());
        assert!(chunks.is_terminated());
        assert!(chunks.next().await.is_none());
    }

    #[tokio::test]
    async fn test_exhaustion_without_terminator() {
        let chunks: Vec<_> = AsyncChunkStream::new(frames(&["", "data: {}"]))
            .collect()
            .await;
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.as_ref().unwrap().is_empty()));
    }

    #[tokio::test]
    async fn test_transport_error_is_fatal() {
        let source = stream::iter(vec![
            Err("socket closed".to_string()),
            Ok("data: {}".to_string()),
        ]);
        let mut chunks = AsyncChunkStream::new(source);

        let err = chunks.next().await.unwrap().unwrap_err();
        assert!(matches!(err, StreamError::TransportError(ref m) if m == "socket closed"));
        assert!(chunks.next().await.is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_ends_stream() {
        let mut chunks = AsyncChunkStream::new(frames(&[
            r#"data: {"error":{"message":"Rate limit exceeded","code":429}}"#,
            r#"data: {"choices":[{"delta":{"content":"after"}}]}"#,
        ]));

        let err = chunks.next().await.unwrap().unwrap_err();
        assert!(matches!(err, StreamError::UpstreamError { .. }));
        assert_eq!(chunks.state(), StreamState::Exhausted);
        assert!(chunks.next().await.is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_degraded_frame_is_logged_with_raw_content() {
        let mut chunks = AsyncChunkStream::new(frames(&[
            "not-json",
            r#"data: {"choices":[{"delta":{"content":"after"}}]}"#,
        ]));

        assert!(chunks.next().await.unwrap().unwrap().is_empty());
        assert!(logs_contain("Error parsing chunk"));
        assert!(logs_contain("not-json"));

        assert_eq!(chunks.next().await.unwrap().unwrap().text, "after");
    }
}
