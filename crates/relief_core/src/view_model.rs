use crate::{Article, LogClass, Progress, SessionId, StreamPhase};

/// Everything the rendering layer may read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamViewModel {
    pub session_id: Option<SessionId>,
    pub query: Option<String>,
    pub phase: StreamPhase,
    pub busy: bool,
    /// Arrival order, most recent last.
    pub log: Vec<LogLineView>,
    /// Newest first.
    pub articles: Vec<ArticleView>,
    pub error: Option<String>,
    pub progress: Option<Progress>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLineView {
    pub message: String,
    pub class: LogClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub url: String,
    pub title: String,
    pub source: String,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub summary: String,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        Self {
            url: article.url.clone(),
            title: article.title.clone(),
            source: article.source.clone(),
            authors: article.authors.clone(),
            publish_date: article.publish_date.clone(),
            summary: article.summary.clone(),
        }
    }
}
