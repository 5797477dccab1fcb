pub mod async_stream;
pub mod frame;
pub mod normalizer;
pub mod state;
pub mod sync_iter;

pub use async_stream::AsyncChunkStream;
pub use frame::{FrameOptions, FrameOutcome, process_frame, strip_framing};
pub use normalizer::{normalize, normalize_str};
pub use state::StreamState;
pub use sync_iter::SyncChunkIterator;
