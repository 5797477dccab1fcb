use std::convert::Infallible;
use std::pin::Pin;

use bytes::Bytes;
use eventsource_stream::{EventStreamError, Eventsource};
use futures::{Stream, StreamExt};

/// Boxed stream of body bytes, e.g. `reqwest::Response::bytes_stream()`
pub type ByteStream<E> = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, E>> + Send>>;

/// Boxed stream of event payloads, as consumed by [`crate::AsyncChunkStream`]
pub type FrameStream<E> =
    Pin<Box<dyn Stream<Item = std::result::Result<String, EventStreamError<E>>> + Send>>;

/// Parse a chunked byte body as server-sent events, one frame per event
///
/// Multi-line `data:` fields are joined, comments and `event:` lines never
/// reach the frame handling.
pub fn sse_frames<E>(body: ByteStream<E>) -> FrameStream<E>
where
    E: Send + 'static,
{
    Box::pin(
        body.eventsource()
            .map(|event| event.map(|event| event.data)),
    )
}

/// Split an in-memory body into event frames for the blocking adapter
pub fn frames_from_bytes(
    body: &[u8],
) -> Vec<std::result::Result<String, EventStreamError<Infallible>>> {
    let body: ByteStream<Infallible> = Box::pin(futures::stream::iter([Ok(
        Bytes::copy_from_slice(body),
    )]));
    futures::executor::block_on(sse_frames(body).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn body<E: Send + 'static>(parts: Vec<std::result::Result<&'static str, E>>) -> ByteStream<E> {
        Box::pin(stream::iter(
            parts.into_iter().map(|part| part.map(Bytes::from)),
        ))
    }

    #[tokio::test]
    async fn test_sse_frames_rechunks_events() {
        let frames: Vec<String> = sse_frames(body::<std::io::Error>(vec![
            Ok("data: {\"a\""),
            Ok(":1}\n\ndata: [DO"),
            Ok("NE]\n\n"),
        ]))
        .map(|f| f.unwrap())
        .collect()
        .await;
        assert_eq!(frames, vec![r#"{"a":1}"#, "[DONE]"]);
    }

    #[tokio::test]
    async fn test_sse_frames_skip_comments_and_event_names() {
        let frames: Vec<String> = sse_frames(body::<std::io::Error>(vec![Ok(
            ": ping\n\nevent: message\ndata: {\"b\":2}\n\n",
        )]))
        .map(|f| f.unwrap())
        .collect()
        .await;
        assert_eq!(frames, vec![r#"{"b":2}"#]);
    }

    #[tokio::test]
    async fn test_multi_line_data_is_one_frame() {
        let frames: Vec<String> = sse_frames(body::<std::io::Error>(vec![Ok(
            "data: {\"choices\":\ndata: []}\n\n",
        )]))
        .map(|f| f.unwrap())
        .collect()
        .await;
        assert_eq!(frames, vec!["{\"choices\":\n[]}"]);
    }

    #[tokio::test]
    async fn test_sse_frames_body_error() {
        let mut frames = sse_frames(body(vec![
            Ok("data: {}\n\n"),
            Err("connection reset by peer".to_string()),
        ]));
        assert_eq!(frames.next().await.unwrap().unwrap(), "{}");
        let err = frames.next().await.unwrap().unwrap_err();
        assert!(matches!(err, EventStreamError::Transport(ref e) if e == "connection reset by peer"));
    }

    #[test]
    fn test_frames_from_bytes() {
        let frames: Vec<String> = frames_from_bytes(b"data: {}\n\n: keep-alive\n\ndata: [DONE]\n\n")
            .into_iter()
            .map(|f| f.unwrap())
            .collect();
        assert_eq!(frames, vec!["{}", "[DONE]"]);
    }
}
