use std::path::PathBuf;

use clap::Parser;
use relief_core::ScrapeRequest;

use super::config::AppConfig;

/// Stream disaster-relief news articles from the scrape service.
#[derive(Debug, Parser)]
#[command(name = "relief-scrape", version)]
pub struct Cli {
    /// Search query, e.g. "earthquake Myanmar".
    pub query: String,

    /// Event date (RFC 2822); the service narrows results to a window around it.
    #[arg(long)]
    pub event_date: Option<String>,

    /// Country the articles must mention.
    #[arg(long)]
    pub country: Option<String>,

    /// GDACS event type code, e.g. EQ or FL.
    #[arg(long)]
    pub event_type: Option<String>,

    /// Streaming endpoint; overrides the config file.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides the config file.
    #[arg(long = "log")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn request(&self) -> ScrapeRequest {
        ScrapeRequest {
            query: self.query.clone(),
            event_type: self.event_type.clone(),
            event_date: self.event_date.clone(),
            country: self.country.clone(),
        }
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_and_build_request() {
        let cli = Cli::parse_from([
            "relief-scrape",
            "flood Pakistan",
            "--country",
            "Pakistan",
            "--endpoint",
            "http://localhost:9999/api/scrape/stream",
            "--log",
            "debug",
        ]);

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.endpoint, "http://localhost:9999/api/scrape/stream");
        assert_eq!(config.log_level, "debug");

        let request = cli.request();
        assert_eq!(request.query, "flood Pakistan");
        assert_eq!(request.country.as_deref(), Some("Pakistan"));
        assert_eq!(request.event_date, None);
    }
}
