use std::sync::mpsc;
use std::time::Duration;

use futures_util::StreamExt;
use relief_logging::relief_trace;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, FailureKind, SessionId, StreamRequest, StreamSummary, TransportError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/scrape/stream";

#[derive(Debug, Clone)]
pub struct StreamSettings {
    pub endpoint: String,
    /// Bounds connection setup only. Reading the body is never timed out.
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("relief-scrape/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub trait ChunkSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelChunkSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelChunkSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ChunkSink for ChannelChunkSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Opens a scrape stream and forwards the body, chunk by chunk, to a sink.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn stream(
        &self,
        session_id: SessionId,
        request: &StreamRequest,
        sink: &dyn ChunkSink,
        cancel: &CancellationToken,
    ) -> Result<StreamSummary, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: StreamSettings,
}

impl ReqwestTransport {
    pub fn new(settings: StreamSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .user_agent(self.settings.user_agent.clone())
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn stream(
        &self,
        session_id: SessionId,
        request: &StreamRequest,
        sink: &dyn ChunkSink,
        cancel: &CancellationToken,
    ) -> Result<StreamSummary, TransportError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let send = client
            .post(endpoint)
            .header(ACCEPT, "text/event-stream")
            .json(request)
            .send();
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::cancelled()),
            response = send => response.map_err(map_reqwest_error)?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let mut summary = StreamSummary {
            final_url: response.url().to_string(),
            content_type: response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string()),
            chunks: 0,
            bytes: 0,
        };

        let mut body = response.bytes_stream();
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TransportError::cancelled()),
                next = body.next() => next,
            };
            let Some(chunk) = next else {
                break;
            };
            let chunk = chunk.map_err(map_reqwest_error)?;
            summary.chunks += 1;
            summary.bytes += chunk.len() as u64;
            relief_trace!(session = session_id; "chunk of {} bytes", chunk.len());
            sink.emit(EngineEvent::Chunk {
                session_id,
                bytes: chunk,
            });
        }

        Ok(summary)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_connect() {
        return TransportError::new(FailureKind::Connect, err.to_string());
    }
    if err.is_builder() {
        return TransportError::new(FailureKind::InvalidUrl, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
