use relief_logging::relief_debug;

use crate::decoder::ChunkedLineDecoder;
use crate::envelope::{parse_frame, Frame};
use crate::stream::{fold, StreamState};
use crate::view_model::{ArticleView, LogLineView, StreamViewModel};
use crate::ScrapeRequest;

/// Identity of one scrape request. Allocated by [`AppState`], never reused.
pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    last_session_id: SessionId,
    live_session: Option<SessionId>,
    transport_open: bool,
    request: Option<ScrapeRequest>,
    decoder: ChunkedLineDecoder,
    stream: StreamState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> StreamViewModel {
        StreamViewModel {
            session_id: self.live_session,
            query: self.request.as_ref().map(|request| request.query.clone()),
            phase: self.stream.phase(),
            busy: self.stream.is_busy(),
            log: self
                .stream
                .log()
                .iter()
                .map(|entry| LogLineView {
                    message: entry.message.clone(),
                    class: entry.class,
                })
                .collect(),
            articles: self.stream.articles().map(ArticleView::from).collect(),
            error: self.stream.error().map(ToOwned::to_owned),
            progress: self.stream.progress(),
            dirty: self.dirty,
        }
    }

    pub fn stream(&self) -> &StreamState {
        &self.stream
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.live_session
    }

    pub fn is_busy(&self) -> bool {
        self.stream.is_busy()
    }

    /// True until the live session's transport has ended or failed.
    ///
    /// Unlike [`AppState::is_busy`], this stays true after an `error` event,
    /// since frames still in flight keep being folded.
    pub fn awaiting_transport(&self) -> bool {
        self.open_session().is_some()
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Session whose transport is still delivering, if any.
    pub(crate) fn open_session(&self) -> Option<SessionId> {
        self.live_session.filter(|_| self.transport_open)
    }

    /// True only for the live session while its transport is open.
    pub(crate) fn accepts(&self, session_id: SessionId) -> bool {
        self.open_session() == Some(session_id)
    }

    /// Replaces all per-session state with a fresh streaming session.
    pub(crate) fn start_session(&mut self, request: ScrapeRequest) -> SessionId {
        self.last_session_id += 1;
        let session_id = self.last_session_id;
        self.live_session = Some(session_id);
        self.transport_open = true;
        self.request = Some(request);
        self.decoder = ChunkedLineDecoder::new();
        self.stream = StreamState::streaming();
        self.dirty = true;
        session_id
    }

    pub(crate) fn ingest_chunk(&mut self, bytes: &[u8]) {
        for line in self.decoder.feed(bytes) {
            self.ingest_line(&line);
        }
    }

    pub(crate) fn end_transport(&mut self) {
        if let Some(line) = self.decoder.finalize() {
            self.ingest_line(&line);
        }
        self.stream = std::mem::take(&mut self.stream).end_of_transport();
        self.transport_open = false;
        self.dirty = true;
    }

    pub(crate) fn fail_transport(&mut self, message: String) {
        // A half-received line is not salvaged.
        self.decoder = ChunkedLineDecoder::new();
        self.stream = std::mem::take(&mut self.stream).transport_failed(message);
        self.transport_open = false;
        self.dirty = true;
    }

    /// Back to idle with nothing displayed. Session ids keep counting.
    pub(crate) fn reset(&mut self) {
        if self.live_session.is_none() {
            return;
        }
        self.live_session = None;
        self.transport_open = false;
        self.request = None;
        self.decoder = ChunkedLineDecoder::new();
        self.stream = StreamState::new();
        self.dirty = true;
    }

    fn ingest_line(&mut self, line: &str) {
        match parse_frame(line) {
            Frame::Ignored => {}
            Frame::Malformed(reason) => {
                relief_debug!(
                    session = self.live_session.unwrap_or_default();
                    "dropping malformed frame: {}",
                    reason
                );
            }
            Frame::Event(envelope) => {
                self.stream = fold(std::mem::take(&mut self.stream), envelope);
                self.dirty = true;
            }
        }
    }
}
