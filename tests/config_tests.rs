use cc_powerline::config::{
    get_config_search_paths, load_config_file, parse_config, BlockDisplay, BudgetKind, BurnType,
    Charset, ColorCompatibility, Config, DirectoryStyle, DisplayStyle, SegmentSettings,
    UsageDisplay,
};
use cc_powerline::segments::SegmentKind;
use cc_powerline::themes::ColorLevel;
use tempfile::TempDir;

fn kinds(config: &Config, line: usize) -> Vec<SegmentKind> {
    config.display.lines[line]
        .segments
        .iter()
        .map(SegmentSettings::kind)
        .collect()
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.theme, "dark");
    assert_eq!(config.display.style, DisplayStyle::Minimal);
    assert_eq!(config.display.charset, Charset::Unicode);
    assert!(config.display.auto_wrap);
    assert_eq!(
        kinds(&config, 0),
        vec![
            SegmentKind::Directory,
            SegmentKind::Git,
            SegmentKind::Model,
            SegmentKind::Session,
            SegmentKind::Today,
            SegmentKind::Context,
        ]
    );

    let empty = parse_config("{}").unwrap();
    assert_eq!(kinds(&empty, 0), kinds(&config, 0));
}

#[test]
fn test_segment_order_is_preserved() {
    let config = parse_config(
        r#"{"display": {"lines": [
            {"segments": {"version": {}, "tmux": {}, "block": {}, "directory": {}}},
            {"segments": {"metrics": {}, "git": {}}}
        ]}}"#,
    )
    .unwrap();

    assert_eq!(
        kinds(&config, 0),
        vec![
            SegmentKind::Version,
            SegmentKind::Tmux,
            SegmentKind::Block,
            SegmentKind::Directory,
        ]
    );
    assert_eq!(kinds(&config, 1), vec![SegmentKind::Metrics, SegmentKind::Git]);
}

#[test]
fn test_unknown_segments_and_options_are_tolerated() {
    let config = parse_config(
        r#"{"display": {"style": "neon", "charset": "TEXT", "lines": [{"segments": {
            "weather": {"city": "Oslo"},
            "directory": {"style": "fish", "extra": true},
            "block": {"type": "sideways", "burnType": "both"},
            "session": {"type": 42}
        }}]}}"#,
    )
    .unwrap();

    assert_eq!(config.display.style, DisplayStyle::Minimal);
    assert_eq!(config.display.charset, Charset::Text);
    assert_eq!(kinds(&config, 0), vec![SegmentKind::Directory, SegmentKind::Block, SegmentKind::Session]);

    let segments = &config.display.lines[0].segments;
    match segments.get(SegmentKind::Directory) {
        Some(SegmentSettings::Directory(dir)) => assert_eq!(dir.effective_style(), DirectoryStyle::Fish),
        other => panic!("unexpected {:?}", other),
    }
    match segments.get(SegmentKind::Block) {
        Some(SegmentSettings::Block(block)) => {
            assert_eq!(block.display_type, BlockDisplay::Cost);
            assert_eq!(block.burn_type, BurnType::Both);
        }
        other => panic!("unexpected {:?}", other),
    }
    match segments.get(SegmentKind::Session) {
        Some(SegmentSettings::Session(session)) => assert_eq!(session.display_type, None),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_show_basename_overrides_style() {
    let config = parse_config(
        r#"{"display": {"lines": [{"segments": {"directory": {"style": "full", "showBasename": true}}}]}}"#,
    )
    .unwrap();
    match config.display.lines[0].segments.get(SegmentKind::Directory) {
        Some(SegmentSettings::Directory(dir)) => {
            assert_eq!(dir.effective_style(), DirectoryStyle::Basename)
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_budget_and_colors() {
    let config = parse_config(
        r##"{
            "theme": "custom",
            "colors": {"git": {"bg": "#112233", "fg": "#ffffff"}},
            "budget": {
                "session": {"amount": 10},
                "block": {"amount": 500000, "type": "tokens", "warningThreshold": 90}
            },
            "display": {"colorCompatibility": "ansi256"}
        }"##,
    )
    .unwrap();

    let budget = config.budget.as_ref().unwrap();
    let session = budget.session.as_ref().unwrap();
    assert_eq!(session.amount, 10.0);
    assert_eq!(session.budget_type, None);
    let block = budget.block.as_ref().unwrap();
    assert_eq!(block.budget_type, Some(BudgetKind::Tokens));
    assert_eq!(block.warning_threshold, Some(90.0));
    assert!(budget.today.is_none());

    assert_eq!(config.colors.as_ref().unwrap()["git"].bg, "#112233");
    assert_eq!(config.display.color_compatibility, ColorCompatibility::Ansi256);
    assert_eq!(
        config.display.color_compatibility.level(ColorLevel::TrueColor),
        ColorLevel::Ansi256
    );
    assert_eq!(ColorCompatibility::Auto.level(ColorLevel::Ansi), ColorLevel::Ansi);
}

#[test]
fn test_repeated_key_keeps_first_position() {
    let config = parse_config(
        r#"{"display": {"lines": [{"segments": {
            "model": {}, "tmux": {}, "model": {"enabled": false}
        }}]}}"#,
    )
    .unwrap();
    assert_eq!(kinds(&config, 0), vec![SegmentKind::Model, SegmentKind::Tmux]);
    assert!(!config.display.lines[0].segments.get(SegmentKind::Model).unwrap().enabled());
}

#[test]
fn test_usage_display_parsing() {
    assert_eq!(" Breakdown ".parse::<UsageDisplay>(), Ok(UsageDisplay::Breakdown));
    assert!("nope".parse::<UsageDisplay>().is_err());
    assert_eq!("capsule".parse::<DisplayStyle>(), Ok(DisplayStyle::Capsule));
}

#[test]
fn test_serialized_config_round_trips_order() {
    let config = parse_config(
        r#"{"display": {"lines": [{"segments": {"today": {}, "git": {}}}]}}"#,
    )
    .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let reparsed = parse_config(&json).unwrap();
    assert_eq!(kinds(&reparsed, 0), vec![SegmentKind::Today, SegmentKind::Git]);
}

#[tokio::test]
async fn test_load_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, r#"{"theme": "nord", "display": {"style": "powerline"}}"#)
        .await
        .unwrap();

    let config = load_config_file(&path).await.unwrap();
    assert_eq!(config.theme, "nord");
    assert_eq!(config.display.style, DisplayStyle::Powerline);

    tokio::fs::write(&path, "{ broken").await.unwrap();
    let err = load_config_file(&path).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));

    assert!(load_config_file(&dir.path().join("missing.json")).await.is_err());
}

#[test]
fn test_search_paths_start_local() {
    let paths = get_config_search_paths();
    assert_eq!(paths[0], std::path::PathBuf::from(".cc-powerline.json"));
}
