use cc_powerline::config::GitConfig;
use cc_powerline::providers::transcript::{load_session_transcript, parse_transcript_file};
use cc_powerline::providers::{git, usage, HookData, PricingService, TranscriptScanner};
use chrono::{Duration, Utc};
use std::path::Path;
use tempfile::TempDir;

fn entry(ts: chrono::DateTime<Utc>, id: &str, request: &str, model: &str, input: u64, output: u64) -> String {
    format!(
        r#"{{"type":"assistant","timestamp":"{}","requestId":"{}","message":{{"id":"{}","role":"assistant","model":"{}","usage":{{"input_tokens":{},"output_tokens":{}}}}}}}"#,
        ts.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        request,
        id,
        model,
        input,
        output
    )
}

fn write_project(root: &Path, project: &str, session: &str, lines: &[String]) {
    let dir = root.join("projects").join(project);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{}.jsonl", session)), lines.join("\n")).unwrap();
}

#[test]
fn test_scanner_dedupes_across_projects() {
    let root = TempDir::new().unwrap();
    let now = Utc::now();
    let shared = entry(now - Duration::minutes(30), "msg-1", "req-1", "claude-sonnet-4", 1_000, 100);

    write_project(
        root.path(),
        "alpha",
        "s1",
        &[shared.clone(), entry(now - Duration::minutes(10), "msg-2", "req-2", "claude-sonnet-4", 500, 50)],
    );
    write_project(root.path(), "beta", "s2", &[shared, "garbage line".to_string()]);
    std::fs::write(root.path().join("projects").join("alpha").join("notes.txt"), "skip me").unwrap();

    let entries = TranscriptScanner::new(vec![root.path().to_path_buf()]).load();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].timestamp <= entries[1].timestamp);
}

#[test]
fn test_scanner_drops_entries_before_cutoff() {
    let root = TempDir::new().unwrap();
    let now = Utc::now();
    write_project(
        root.path(),
        "alpha",
        "s1",
        &[
            entry(now - Duration::days(3), "old", "r-old", "claude-sonnet-4", 10, 10),
            entry(now - Duration::hours(1), "new", "r-new", "claude-sonnet-4", 10, 10),
        ],
    );

    let entries = TranscriptScanner::new(vec![root.path().to_path_buf()])
        .since(now - Duration::hours(24))
        .load();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message.as_ref().and_then(|m| m.id.as_deref()), Some("new"));
}

#[test]
fn test_missing_roots_yield_nothing() {
    let root = TempDir::new().unwrap();
    let scanner = TranscriptScanner::new(vec![root.path().join("nope")]);
    assert!(scanner.discover_files().is_empty());
    assert!(scanner.load().is_empty());
}

#[tokio::test]
async fn test_session_transcript_to_facts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.jsonl");
    let start = Utc::now() - Duration::minutes(20);
    let lines = [
        format!(
            r#"{{"type":"user","timestamp":"{}","message":{{"role":"user","content":"hello"}}}}"#,
            start.format("%Y-%m-%dT%H:%M:%S%.3fZ")
        ),
        entry(start + Duration::seconds(5), "m1", "r1", "claude-opus-4-1", 2_000, 500),
        entry(start + Duration::seconds(5), "m1", "r1", "claude-opus-4-1", 2_000, 500),
    ];
    tokio::fs::write(&path, lines.join("\n")).await.unwrap();

    let entries = load_session_transcript(&path).await.unwrap();
    assert_eq!(entries.len(), 2);

    let pricing = PricingService::new();
    let session = usage::session_usage(&entries, &pricing);
    assert_eq!(session.tokens, Some(2_500));
    let expected = 2_000.0 / 1e6 * 15.0 + 500.0 / 1e6 * 75.0;
    assert!((session.cost.unwrap() - expected).abs() < 1e-9);

    assert_eq!(usage::context_usage(&entries).map(|c| c.input_tokens), Some(2_000));
    let metrics = usage::session_metrics(&entries).unwrap();
    assert_eq!(metrics.message_count, Some(1));
    assert_eq!(metrics.response_time, Some(5.0));

    let block = usage::block_usage(&entries, Utc::now(), &pricing).unwrap();
    assert_eq!(block.weighted_tokens, Some(12_500));
}

#[tokio::test]
async fn test_missing_transcript_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(load_session_transcript(&dir.path().join("absent.jsonl")).await.is_err());
    assert!(parse_transcript_file(&dir.path().join("absent.jsonl")).is_err());
}

#[test]
fn test_git_outside_repository() {
    let dir = TempDir::new().unwrap();
    let info = tokio_test::block_on(git::load_git_info(dir.path(), &GitConfig::default()));
    assert!(info.is_none());
}

#[test]
fn test_hook_payload_drives_directory() {
    let hook = HookData::parse(
        r#"{"workspace": {"current_dir": "/srv/app/web", "project_dir": "/srv/app"}, "version": "1.2.3"}"#,
    )
    .unwrap();
    assert_eq!(hook.current_dir().as_deref(), Some(Path::new("/srv/app/web")));
    assert_eq!(hook.version.as_deref(), Some("1.2.3"));
}
