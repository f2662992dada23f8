//! Fact gathering. Every provider may fail or come back empty and is
//! bounded by a timeout; a missing fact means "unknown", never an error.

pub mod git;
pub mod hook;
pub mod pricing;
pub mod tmux;
pub mod transcript;
pub mod usage;

pub use hook::HookData;
pub use pricing::{PricingService, TokenBreakdown};
pub use transcript::{TranscriptEntry, TranscriptScanner};

use chrono::{DateTime, Duration as ChronoDuration, Local, Utc};
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::{Config, GitConfig, SegmentSettings};
use crate::segments::{DirectoryInfo, MetricsInfo, SegmentKind, SessionFacts};
use crate::utils::{debug_with_context, warn};

pub const TRANSCRIPT_TIMEOUT: Duration = Duration::from_secs(2);
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(3);
pub const GIT_TOTAL_TIMEOUT: Duration = Duration::from_secs(2);

/// How far back the cross-project scan looks for today and block totals.
pub const SCAN_WINDOW_HOURS: i64 = 24;

/// Segment kinds enabled anywhere in the config.
pub fn enabled_kinds(config: &Config) -> HashSet<SegmentKind> {
    config
        .display
        .lines
        .iter()
        .flat_map(|line| line.segments.iter())
        .filter(|s| s.enabled())
        .map(SegmentSettings::kind)
        .collect()
}

async fn bounded<T>(name: &str, limit: Duration, fut: impl Future<Output = Option<T>>) -> Option<T> {
    match timeout(limit, fut).await {
        Ok(value) => value,
        Err(_) => {
            debug_with_context(name, "timed out");
            None
        }
    }
}

/// Local midnight as a UTC instant.
pub fn local_day_start() -> DateTime<Utc> {
    let now = Local::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .map(|midnight| midnight.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Collect everything the enabled segments need, concurrently.
pub async fn gather_facts(hook: &HookData, config: &Config) -> SessionFacts {
    let wanted = enabled_kinds(config);
    let wants = |kind: SegmentKind| wanted.contains(&kind);

    let current_dir = hook
        .current_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let git_config = config
        .display
        .lines
        .iter()
        .find_map(|line| match line.segments.get(SegmentKind::Git) {
            Some(SegmentSettings::Git(git)) => Some(git.clone()),
            _ => None,
        })
        .unwrap_or_else(GitConfig::default);

    let transcript_fut = async {
        if !(wants(SegmentKind::Session) || wants(SegmentKind::Context) || wants(SegmentKind::Metrics)) {
            return None;
        }
        let path = hook.transcript_path.as_deref()?;
        match transcript::load_session_transcript(path).await {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn(&format!("{:#}", e));
                None
            }
        }
    };

    let scan_fut = async {
        if !(wants(SegmentKind::Today) || wants(SegmentKind::Block)) {
            return None;
        }
        let cutoff = Utc::now() - ChronoDuration::hours(SCAN_WINDOW_HOURS);
        let scanner = TranscriptScanner::new(transcript::claude_paths()).since(cutoff);
        tokio::task::spawn_blocking(move || scanner.load()).await.ok()
    };

    let git_fut = async {
        if !wants(SegmentKind::Git) {
            return None;
        }
        git::load_git_info(&current_dir, &git_config).await
    };

    let tmux_fut = async {
        if !wants(SegmentKind::Tmux) {
            return None;
        }
        tmux::tmux_session_id().await
    };

    let (session_entries, recent_entries, git_info, tmux_session) = tokio::join!(
        bounded("transcript", TRANSCRIPT_TIMEOUT, transcript_fut),
        bounded("scan", SCAN_TIMEOUT, scan_fut),
        bounded("git", GIT_TOTAL_TIMEOUT, git_fut),
        bounded("tmux", tmux::TMUX_TIMEOUT, tmux_fut),
    );

    let pricing = PricingService::new();
    let now = Utc::now();

    let mut facts = SessionFacts {
        directory: DirectoryInfo {
            current_dir,
            project_dir: hook.project_dir(),
            home_dir: dirs::home_dir(),
        },
        git: git_info,
        model: hook.model_info(),
        tmux_session,
        version: hook.version.clone(),
        ..SessionFacts::default()
    };

    if let Some(entries) = &session_entries {
        let mut session = usage::session_usage(entries, &pricing);
        if let Some(cost) = hook.cost.as_ref().and_then(|c| c.total_cost_usd) {
            session.cost = Some(cost);
        }
        facts.session = Some(session);
        facts.context = usage::context_usage(entries);
        facts.metrics = usage::session_metrics(entries);
    }

    if let Some(entries) = &recent_entries {
        facts.today = Some(usage::today_usage(entries, local_day_start(), &pricing));
        facts.block = usage::block_usage(entries, now, &pricing);
    }

    if let Some(cost) = &hook.cost {
        apply_hook_metrics(facts.metrics.get_or_insert_with(MetricsInfo::default), cost);
    }

    facts
}

/// Host-reported totals override what the transcript implies.
pub fn apply_hook_metrics(metrics: &mut MetricsInfo, cost: &hook::CostInfo) {
    if let Some(ms) = cost.total_duration_ms.filter(|ms| *ms > 0) {
        metrics.session_duration = Some(ms as f64 / 1000.0);
    }
    if cost.total_lines_added.is_some() {
        metrics.lines_added = cost.total_lines_added;
    }
    if cost.total_lines_removed.is_some() {
        metrics.lines_removed = cost.total_lines_removed;
    }
}
