use crate::{ScrapeRequest, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a new scrape query.
    ScrapeSubmitted(ScrapeRequest),
    /// Transport delivered a chunk of the response body.
    ChunkReceived { session_id: SessionId, bytes: Vec<u8> },
    /// Transport reached the end of the response body.
    TransportEnded { session_id: SessionId },
    /// Transport could not open or keep reading the response.
    TransportFailed { session_id: SessionId, message: String },
    /// User cleared the results.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
