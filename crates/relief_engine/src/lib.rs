//! Relief engine: streaming transport for scrape requests.
mod engine;
mod stream;
mod types;

pub use engine::EngineHandle;
pub use stream::{
    ChannelChunkSink, ChunkSink, ReqwestTransport, StreamSettings, Transport, DEFAULT_ENDPOINT,
};
pub use types::{
    EngineEvent, FailureKind, SessionId, StreamRequest, StreamSummary, TransportError,
};
