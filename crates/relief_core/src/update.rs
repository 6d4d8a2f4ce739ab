use relief_logging::{relief_debug, relief_info, relief_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScrapeSubmitted(request) => {
            let Some(request) = request.normalized() else {
                relief_warn!("ignoring scrape request with an empty query");
                return (state, Vec::new());
            };

            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = state.open_session() {
                relief_info!(session = previous; "superseded by a new request");
                effects.push(Effect::CancelStream {
                    session_id: previous,
                });
            }

            let session_id = state.start_session(request.clone());
            relief_info!(session = session_id; "scrape started for {:?}", request.query);
            effects.push(Effect::OpenStream {
                session_id,
                request,
            });
            effects
        }
        Msg::ChunkReceived { session_id, bytes } => {
            if !state.accepts(session_id) {
                relief_debug!(session = session_id; "dropping stale chunk of {} bytes", bytes.len());
                return (state, Vec::new());
            }
            state.ingest_chunk(&bytes);
            Vec::new()
        }
        Msg::TransportEnded { session_id } => {
            if !state.accepts(session_id) {
                relief_debug!(session = session_id; "ignoring end of stale stream");
                return (state, Vec::new());
            }
            state.end_transport();
            relief_info!(
                session = session_id;
                "stream ended in {:?} with {} articles",
                state.stream().phase(),
                state.stream().article_count()
            );
            Vec::new()
        }
        Msg::TransportFailed {
            session_id,
            message,
        } => {
            if !state.accepts(session_id) {
                relief_debug!(session = session_id; "ignoring failure of stale stream: {}", message);
                return (state, Vec::new());
            }
            relief_warn!(session = session_id; "transport failed: {}", message);
            state.fail_transport(message);
            Vec::new()
        }
        Msg::ResetClicked => {
            let cancel = state.open_session();
            state.reset();
            cancel
                .map(|session_id| Effect::CancelStream { session_id })
                .into_iter()
                .collect()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
