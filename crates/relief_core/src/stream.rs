use std::collections::VecDeque;

use url::Url;

use crate::envelope::{Article, Envelope, Progress};

/// Log message appended when a `done` event arrives.
pub const DONE_MESSAGE: &str = "Done.";
/// Prefix of the log message derived from an `article` event.
pub const SCRAPED_PREFIX: &str = "Scraped: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamPhase {
    #[default]
    Idle,
    Streaming,
    Completed,
    Failed,
}

impl StreamPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamPhase::Completed | StreamPhase::Failed)
    }
}

/// Display class of a log entry. Has no effect on control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogClass {
    Info,
    Scraped,
    Skipped,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The `type` of the event that produced this entry.
    pub kind: String,
    pub message: String,
    pub class: LogClass,
}

impl LogEntry {
    fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        let kind = kind.into();
        let message = message.into();
        let class = classify(&kind, &message);
        Self {
            kind,
            message,
            class,
        }
    }
}

pub fn classify(kind: &str, message: &str) -> LogClass {
    match kind {
        "error" => LogClass::Error,
        "done" => LogClass::Done,
        _ if message.starts_with(SCRAPED_PREFIX.trim_end()) => LogClass::Scraped,
        _ if message.contains("Skipped") => LogClass::Skipped,
        _ => LogClass::Info,
    }
}

/// Key under which articles are deduplicated: the trimmed url with only its
/// scheme and host lower-cased. Path, query and fragment compare exactly, so
/// `/story` and `/story/` stay distinct. Unparseable urls compare as text.
pub fn article_key(url: &str) -> String {
    let trimmed = url.trim();
    let has_host = Url::parse(trimmed).is_ok_and(|parsed| parsed.has_host());
    let Some((scheme, rest)) = trimmed.split_once("://").filter(|_| has_host) else {
        return trimmed.to_string();
    };
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    format!(
        "{}://{}{}",
        scheme.to_ascii_lowercase(),
        authority.to_ascii_lowercase(),
        tail
    )
}

/// Everything one scrape session has accumulated.
///
/// Only [`fold`] and the transport transitions below mutate it; the log and
/// the article list only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamState {
    phase: StreamPhase,
    log: Vec<LogEntry>,
    /// Each article with its [`article_key`], newest first.
    articles: VecDeque<(String, Article)>,
    error: Option<String>,
    progress: Option<Progress>,
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state for a session whose request has just been issued.
    pub fn streaming() -> Self {
        Self {
            phase: StreamPhase::Streaming,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == StreamPhase::Streaming
    }

    /// Entries in arrival order.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Articles, newest first.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter().map(|(_, article)| article)
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// The response body ended. A session that saw neither `done` nor
    /// `error` completes by default.
    pub fn end_of_transport(mut self) -> Self {
        if self.phase == StreamPhase::Streaming {
            self.phase = StreamPhase::Completed;
        }
        self
    }

    /// The transport gave up (connect failure, unreadable body, bad status).
    pub fn transport_failed(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.record_error(message.clone());
        self.log.push(LogEntry::new("error", message));
        self
    }

    fn record_error(&mut self, message: String) {
        // The first error of a session wins and the phase never leaves Failed.
        if self.error.is_none() {
            self.error = Some(message);
        }
        self.phase = StreamPhase::Failed;
    }

    fn insert_article(&mut self, article: Article) {
        let key = article_key(&article.url);
        if let Some(index) = self.articles.iter().position(|(existing, _)| *existing == key) {
            self.articles.remove(index);
        }
        self.articles.push_front((key, article));
    }
}

/// Folds one event into the session state.
pub fn fold(mut state: StreamState, event: Envelope) -> StreamState {
    match event {
        Envelope::Article(article) => {
            let message = format!("{SCRAPED_PREFIX}{}", article.title);
            state.insert_article(article);
            state.log.push(LogEntry::new("status", message));
        }
        Envelope::Done => {
            state.log.push(LogEntry::new("done", DONE_MESSAGE));
            if state.phase != StreamPhase::Failed {
                state.phase = StreamPhase::Completed;
            }
        }
        Envelope::Error { message } => {
            state.record_error(message.clone());
            state.log.push(LogEntry::new("error", message));
        }
        Envelope::Log {
            kind,
            message,
            progress,
        } => {
            if progress.is_some() {
                state.progress = progress;
            }
            state.log.push(LogEntry::new(kind, message));
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_type_then_message() {
        assert_eq!(classify("error", "Scraped: x"), LogClass::Error);
        assert_eq!(classify("done", DONE_MESSAGE), LogClass::Done);
        assert_eq!(classify("status", "Scraped: Floods"), LogClass::Scraped);
        assert_eq!(
            classify("progress", "[2/9] Skipped (could not parse)"),
            LogClass::Skipped
        );
        assert_eq!(classify("progress", "[1/9] Resolving Reuters..."), LogClass::Info);
        assert_eq!(classify("heartbeat", ""), LogClass::Info);
    }

    #[test]
    fn article_keys_fold_scheme_and_host_case_only() {
        assert_eq!(
            article_key(" HTTPS://News.Example.com/story "),
            "https://news.example.com/story"
        );
        assert_eq!(
            article_key("https://news.example.com/Story/?ID=7/#Top"),
            "https://news.example.com/Story/?ID=7/#Top"
        );
        assert_ne!(
            article_key("https://news.example.com/story"),
            article_key("https://news.example.com/story/")
        );
        assert_ne!(
            article_key("https://news.example.com/?id=7"),
            article_key("https://news.example.com/?id=7/")
        );
        assert_eq!(article_key(" Not a URL/ "), "Not a URL/");
        assert_eq!(article_key("mailto:Desk@News.example"), "mailto:Desk@News.example");
    }

    #[test]
    fn end_of_transport_keeps_terminal_phases() {
        let failed = fold(
            StreamState::streaming(),
            Envelope::Error {
                message: "boom".into(),
            },
        );
        assert_eq!(failed.end_of_transport().phase(), StreamPhase::Failed);
        assert_eq!(
            StreamState::streaming().end_of_transport().phase(),
            StreamPhase::Completed
        );
        assert_eq!(StreamState::new().end_of_transport().phase(), StreamPhase::Idle);
    }
}
