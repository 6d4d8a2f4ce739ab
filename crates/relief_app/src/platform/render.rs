use relief_core::{LogClass, SessionId, StreamPhase, StreamViewModel};

/// What has already been written for the current session.
#[derive(Debug, Default)]
pub struct RenderCursor {
    session_id: Option<SessionId>,
    log_printed: usize,
}

/// Lines to print for everything new in `view` since the last call.
pub fn render(view: &StreamViewModel, cursor: &mut RenderCursor) -> Vec<String> {
    let mut lines = Vec::new();

    if view.session_id != cursor.session_id {
        cursor.session_id = view.session_id;
        cursor.log_printed = 0;
        if let Some(query) = &view.query {
            lines.push(format!("Scraping \"{query}\""));
        }
    }

    for entry in view.log.iter().skip(cursor.log_printed) {
        lines.push(format!("  {} {}", marker(entry.class), entry.message));
    }
    cursor.log_printed = view.log.len();

    lines
}

/// Final report once the session is over.
pub fn summary(view: &StreamViewModel) -> Vec<String> {
    let count = view.articles.len();
    let mut lines = vec![match (view.phase, &view.error) {
        (StreamPhase::Failed, Some(error)) => format!("Failed: {error} ({count} articles)"),
        (StreamPhase::Failed, None) => format!("Failed ({count} articles)"),
        _ => format!("Completed: {count} articles"),
    }];

    for (index, article) in view.articles.iter().enumerate() {
        let mut heading = format!("{:>3}. {}", index + 1, article.title);
        if !article.source.is_empty() {
            heading.push_str(&format!(" | {}", article.source));
        }
        if let Some(date) = &article.publish_date {
            heading.push_str(&format!(" | {date}"));
        }
        lines.push(heading);
        lines.push(format!("     {}", article.url));
    }
    lines
}

fn marker(class: LogClass) -> char {
    match class {
        LogClass::Info => '·',
        LogClass::Scraped => '+',
        LogClass::Skipped => '-',
        LogClass::Done => '✓',
        LogClass::Error => '!',
    }
}
