use serde::Deserialize;

/// Prefix that marks a line as carrying an event payload.
pub const DATA_PREFIX: &str = "data: ";

/// A scraped news article as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub summary: String,
}

/// `current` / `total` counters attached to `progress` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: u32,
    pub total: u32,
}

/// Parsed payload of a significant frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Article(Article),
    Done,
    Error {
        message: String,
    },
    /// `status`, `progress` and any type this consumer does not know.
    Log {
        kind: String,
        message: String,
        progress: Option<Progress>,
    },
}

/// Classification of a single decoded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// No `data: ` prefix: keep-alives, comments, other SSE fields.
    Ignored,
    /// Prefix present but the payload is not a valid envelope.
    Malformed(String),
    Event(Envelope),
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    article: Option<Article>,
    #[serde(default)]
    current: Option<serde_json::Value>,
    #[serde(default)]
    total: Option<serde_json::Value>,
}

/// Non-negative integer counters only; anything else means "no counter".
fn counter(value: Option<serde_json::Value>) -> Option<u32> {
    value?.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// Classifies one line of the response body.
pub fn parse_frame(line: &str) -> Frame {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Ignored;
    };
    match serde_json::from_str::<RawEnvelope>(payload) {
        Ok(raw) => match raw.into_envelope() {
            Ok(envelope) => Frame::Event(envelope),
            Err(reason) => Frame::Malformed(reason),
        },
        Err(err) => Frame::Malformed(err.to_string()),
    }
}

impl RawEnvelope {
    fn into_envelope(self) -> Result<Envelope, String> {
        let RawEnvelope {
            kind,
            message,
            article,
            current,
            total,
        } = self;
        let envelope = match kind.as_str() {
            "article" => match article {
                Some(article) => Envelope::Article(article),
                None => return Err("article event without article".to_string()),
            },
            "done" => Envelope::Done,
            "error" => Envelope::Error {
                message: message.unwrap_or_else(|| "Unknown error".to_string()),
            },
            _ => Envelope::Log {
                progress: match (counter(current), counter(total)) {
                    (Some(current), Some(total)) => Some(Progress { current, total }),
                    _ => None,
                },
                message: message.unwrap_or_default(),
                kind,
            },
        };
        Ok(envelope)
    }
}
