//! Relief core: incremental scrape-stream decoding and the pure session state machine.
mod decoder;
mod effect;
mod envelope;
mod msg;
mod request;
mod state;
mod stream;
mod update;
mod view_model;

pub use decoder::ChunkedLineDecoder;
pub use effect::Effect;
pub use envelope::{parse_frame, Article, Envelope, Frame, Progress, DATA_PREFIX};
pub use msg::Msg;
pub use request::ScrapeRequest;
pub use state::{AppState, SessionId};
pub use stream::{
    article_key, classify, fold, LogClass, LogEntry, StreamPhase, StreamState, DONE_MESSAGE,
    SCRAPED_PREFIX,
};
pub use update::update;
pub use view_model::{ArticleView, LogLineView, StreamViewModel};
