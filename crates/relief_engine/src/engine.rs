use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use relief_logging::{relief_debug, relief_info, relief_warn};
use tokio_util::sync::CancellationToken;

use crate::stream::{ChannelChunkSink, ReqwestTransport, StreamSettings, Transport};
use crate::{EngineEvent, SessionId, StreamRequest};

enum EngineCommand {
    Open {
        session_id: SessionId,
        request: StreamRequest,
    },
    Cancel {
        session_id: SessionId,
    },
}

/// Runs scrape streams on a background tokio runtime.
///
/// At most one stream is meant to be live: opening a session cancels every
/// stream opened before it. Events for all sessions arrive on one channel in
/// the order they were read, so the consumer must still drop stale ones.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: StreamSettings) -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new(settings)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut live: HashMap<SessionId, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Open {
                        session_id,
                        request,
                    } => {
                        for (previous, token) in live.drain() {
                            relief_debug!(session = previous; "cancelling superseded stream");
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        live.insert(session_id, token.clone());
                        let transport = transport.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_stream(transport.as_ref(), session_id, request, token, event_tx)
                                .await;
                        });
                    }
                    EngineCommand::Cancel { session_id } => {
                        if let Some(token) = live.remove(&session_id) {
                            relief_debug!(session = session_id; "cancelling stream");
                            token.cancel();
                        }
                    }
                }
            }
            for token in live.values() {
                token.cancel();
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn open(&self, session_id: SessionId, request: StreamRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Open {
            session_id,
            request,
        });
    }

    pub fn cancel(&self, session_id: SessionId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { session_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_stream(
    transport: &dyn Transport,
    session_id: SessionId,
    request: StreamRequest,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    relief_info!(session = session_id; "opening stream for {:?}", request.query);
    let sink = ChannelChunkSink::new(event_tx.clone());
    let result = transport
        .stream(session_id, &request, &sink, &cancel)
        .await;
    match &result {
        Ok(summary) => relief_info!(
            session = session_id;
            "stream finished after {} chunks ({} bytes)",
            summary.chunks,
            summary.bytes
        ),
        Err(err) => relief_warn!(session = session_id; "stream ended with {}", err),
    }
    let _ = event_tx.send(EngineEvent::Finished { session_id, result });
}
