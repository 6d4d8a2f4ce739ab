/// Parameters of one scrape request, before it is handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeRequest {
    pub query: String,
    pub event_type: Option<String>,
    pub event_date: Option<String>,
    pub country: Option<String>,
}

impl ScrapeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_event_date(mut self, event_date: impl Into<String>) -> Self {
        self.event_date = Some(event_date.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Trims every field, dropping blank optional ones.
    ///
    /// Returns `None` when the query is blank.
    pub(crate) fn normalized(self) -> Option<Self> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            event_type: non_blank(self.event_type),
            event_date: non_blank(self.event_date),
            country: non_blank(self.country),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
