use crate::{ScrapeRequest, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenStream {
        session_id: SessionId,
        request: ScrapeRequest,
    },
    CancelStream {
        session_id: SessionId,
    },
}
