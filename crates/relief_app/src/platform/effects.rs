use std::time::Duration;

use relief_core::{Effect, Msg, ScrapeRequest};
use relief_engine::{
    EngineEvent, EngineHandle, FailureKind, StreamRequest, StreamSettings, TransportError,
};
use relief_logging::relief_info;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: StreamSettings) -> Self {
        Self {
            engine: EngineHandle::new(settings),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenStream {
                    session_id,
                    request,
                } => {
                    relief_info!(session = session_id; "OpenStream query_len={}", request.query.len());
                    self.engine.open(session_id, map_request(request));
                }
                Effect::CancelStream { session_id } => {
                    self.engine.cancel(session_id);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next transport event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_request(request: ScrapeRequest) -> StreamRequest {
    StreamRequest {
        query: request.query,
        event_type: request.event_type,
        event_date: request.event_date,
        country: request.country,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Chunk { session_id, bytes } => Msg::ChunkReceived {
            session_id,
            bytes: bytes.to_vec(),
        },
        EngineEvent::Finished {
            session_id,
            result: Ok(_),
        } => Msg::TransportEnded { session_id },
        EngineEvent::Finished {
            session_id,
            result: Err(err),
        } => Msg::TransportFailed {
            session_id,
            message: describe_failure(&err),
        },
    }
}

fn describe_failure(err: &TransportError) -> String {
    match &err.kind {
        FailureKind::HttpStatus(code) => format!("Scrape service responded with HTTP {code}"),
        FailureKind::Connect => format!("Could not reach the scrape service: {}", err.message),
        FailureKind::InvalidUrl => format!("Invalid scrape endpoint: {}", err.message),
        FailureKind::Network => format!("Connection lost: {}", err.message),
        FailureKind::Cancelled => "Scrape cancelled".to_string(),
    }
}
