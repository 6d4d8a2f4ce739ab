use pretty_assertions::assert_eq;
use relief_core::{
    fold, parse_frame, Article, Envelope, Frame, LogClass, Progress, StreamPhase, StreamState,
};

fn article(url: &str, title: &str) -> Article {
    Article {
        url: url.to_string(),
        title: title.to_string(),
        text: "text".to_string(),
        authors: vec!["Desk".to_string()],
        publish_date: None,
        source: "Wire".to_string(),
        summary: "summary".to_string(),
    }
}

fn status(message: &str) -> Envelope {
    Envelope::Log {
        kind: "status".to_string(),
        message: message.to_string(),
        progress: None,
    }
}

fn fold_lines(lines: &[&str]) -> StreamState {
    lines
        .iter()
        .filter_map(|line| match parse_frame(line) {
            Frame::Event(envelope) => Some(envelope),
            Frame::Ignored | Frame::Malformed(_) => None,
        })
        .fold(StreamState::streaming(), fold)
}

fn messages(state: &StreamState) -> Vec<&str> {
    state.log().iter().map(|entry| entry.message.as_str()).collect()
}

fn urls(state: &StreamState) -> Vec<&str> {
    state.articles().map(|article| article.url.as_str()).collect()
}

#[test]
fn worked_example_reaches_completed() {
    let state = fold_lines(&[
        r#"data: {"type":"status","message":"starting"}"#,
        r#"data: {"type":"article","article":{"url":"u1","title":"A","text":"t","authors":[],"publish_date":null,"source":"s","summary":"x"}}"#,
        r#"data: {"type":"done"}"#,
    ]);

    assert_eq!(messages(&state), vec!["starting", "Scraped: A", "Done."]);
    assert_eq!(urls(&state), vec!["u1"]);
    assert_eq!(state.error(), None);
    assert_eq!(state.phase(), StreamPhase::Completed);
    assert!(!state.is_busy());
}

#[test]
fn articles_are_newest_first_and_log_is_arrival_order() {
    let events = vec![
        status("Searching"),
        Envelope::Article(article("https://a.example/1", "One")),
        status("[2/3] Resolving"),
        Envelope::Article(article("https://a.example/2", "Two")),
        Envelope::Article(article("https://a.example/3", "Three")),
        status("tail"),
    ];
    let state = events.into_iter().fold(StreamState::streaming(), fold);

    assert_eq!(
        urls(&state),
        vec![
            "https://a.example/3",
            "https://a.example/2",
            "https://a.example/1"
        ]
    );
    assert_eq!(
        messages(&state),
        vec![
            "Searching",
            "Scraped: One",
            "[2/3] Resolving",
            "Scraped: Two",
            "Scraped: Three",
            "tail"
        ]
    );
    assert_eq!(state.phase(), StreamPhase::Streaming);
}

#[test]
fn malformed_frame_is_equivalent_to_omitting_it() {
    let with_garbage = fold_lines(&[
        r#"data: {"type":"status","message":"one"}"#,
        "data: {not json",
        r#"data: {"type":"status","message":"two"}"#,
    ]);
    let without = fold_lines(&[
        r#"data: {"type":"status","message":"one"}"#,
        r#"data: {"type":"status","message":"two"}"#,
    ]);

    assert_eq!(with_garbage, without);
}

#[test]
fn insignificant_lines_leave_no_trace() {
    let state = fold_lines(&["", ": keep-alive", "event: status", "retry: 100"]);
    assert_eq!(state, StreamState::streaming());
}

#[test]
fn unknown_types_are_logged_verbatim() {
    let state = fold_lines(&[r#"data: {"type":"heartbeat","message":"still here"}"#]);
    let entry = &state.log()[0];
    assert_eq!(entry.kind, "heartbeat");
    assert_eq!(entry.message, "still here");
    assert_eq!(entry.class, LogClass::Info);
}

#[test]
fn skipped_and_scraped_messages_are_classified() {
    let state = fold_lines(&[
        r#"data: {"type":"progress","message":"[1/2] Skipped (not relevant to Chile)","current":1,"total":2}"#,
        r#"data: {"type":"article","article":{"url":"u","title":"Quake"}}"#,
    ]);
    let classes: Vec<_> = state.log().iter().map(|entry| entry.class).collect();
    assert_eq!(classes, vec![LogClass::Skipped, LogClass::Scraped]);
}

#[test]
fn error_is_sticky_but_later_events_are_still_folded() {
    let state = fold_lines(&[
        r#"data: {"type":"error","message":"Failed to search news"}"#,
        r#"data: {"type":"article","article":{"url":"u2","title":"Late"}}"#,
        r#"data: {"type":"error","message":"second"}"#,
        r#"data: {"type":"done"}"#,
    ]);

    assert_eq!(state.phase(), StreamPhase::Failed);
    assert_eq!(state.error(), Some("Failed to search news"));
    assert_eq!(urls(&state), vec!["u2"]);
    assert_eq!(
        messages(&state),
        vec!["Failed to search news", "Scraped: Late", "second", "Done."]
    );
    assert_eq!(state.log()[0].class, LogClass::Error);
}

#[test]
fn repeated_done_is_harmless() {
    let state = fold_lines(&[r#"data: {"type":"done"}"#, r#"data: {"type":"done"}"#]);
    assert_eq!(state.phase(), StreamPhase::Completed);
    assert_eq!(messages(&state), vec!["Done.", "Done."]);
}

#[test]
fn duplicate_url_replaces_and_moves_to_front() {
    let state = [
        Envelope::Article(article("https://news.example/a", "First take")),
        Envelope::Article(article("https://news.example/b", "Other")),
        Envelope::Article(article("HTTPS://NEWS.example/a", "Updated take")),
    ]
    .into_iter()
    .fold(StreamState::streaming(), fold);

    let titles: Vec<_> = state.articles().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Updated take", "Other"]);
    assert_eq!(state.article_count(), 2);
    assert_eq!(state.log().len(), 3);
}

#[test]
fn trailing_slash_and_query_variants_are_distinct_articles() {
    let state = [
        Envelope::Article(article("https://n.example/story", "Story")),
        Envelope::Article(article("https://n.example/story/", "Story index")),
        Envelope::Article(article("https://n.example/?id=7/", "Item 7 slash")),
        Envelope::Article(article("https://n.example/?id=7", "Item 7")),
    ]
    .into_iter()
    .fold(StreamState::streaming(), fold);

    assert_eq!(
        urls(&state),
        vec![
            "https://n.example/?id=7",
            "https://n.example/?id=7/",
            "https://n.example/story/",
            "https://n.example/story",
        ]
    );
    assert_eq!(state.article_count(), 4);
}

#[test]
fn progress_tracks_latest_counters() {
    let state = fold_lines(&[
        r#"data: {"type":"progress","message":"[1/3] Resolving","current":1,"total":3}"#,
        r#"data: {"type":"status","message":"no counters"}"#,
        r#"data: {"type":"progress","message":"[2/3] Resolving","current":2,"total":3}"#,
    ]);
    assert_eq!(state.progress(), Some(Progress { current: 2, total: 3 }));
}
