//! Repository facts: gix for what it reads cheaply, the git CLI for
//! working-tree status, counts and stashes.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::GitConfig;
use crate::segments::{GitInfo, GitStatus};
use crate::utils::debug_with_context;

pub const GIT_TIMEOUT: Duration = Duration::from_millis(1500);

/// What gix can tell us without touching the working tree.
#[derive(Debug, Clone, Default)]
struct RepoFacts {
    branch: String,
    sha: Option<String>,
    repo_name: Option<String>,
    git_dir: PathBuf,
    is_worktree: bool,
    commit_time: Option<u64>,
}

/// `None` when `dir` is not inside a repository. CLI calls for clauses the
/// config hides are skipped.
pub async fn load_git_info(dir: &Path, config: &GitConfig) -> Option<GitInfo> {
    let repo = match discover_repo(dir).await {
        Ok(repo) => repo,
        Err(e) => {
            debug_with_context("git", &format!("No repository: {:#}", e));
            return None;
        }
    };

    let (status, stash, tag) = tokio::join!(
        run_git(dir, &["status", "--porcelain=2", "--branch"]),
        async {
            if config.show_stash_count {
                run_git(dir, &["stash", "list"]).await
            } else {
                None
            }
        },
        async {
            if config.show_tag {
                run_git(dir, &["describe", "--tags", "--exact-match", "HEAD"]).await
            } else {
                None
            }
        },
    );

    let mut info = GitInfo {
        branch: repo.branch,
        sha: repo.sha,
        repo_name: repo.repo_name,
        is_worktree: repo.is_worktree,
        operation: detect_operation(&repo.git_dir),
        ..GitInfo::default()
    };

    if let Some(output) = status {
        apply_porcelain(&mut info, &output);
    }
    info.stash_count = stash.map(|s| count_lines(&s)).unwrap_or(0);
    info.tag = tag.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    info.time_since_commit = repo.commit_time.and_then(|committed| {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        Some(now.saturating_sub(committed))
    });

    debug_with_context(
        "git",
        &format!(
            "branch={} sha={:?} status={:?} ahead={} behind={}",
            info.branch, info.sha, info.status, info.ahead, info.behind
        ),
    );
    Some(info)
}

/// gix reads are synchronous, so they run on the blocking pool where the
/// caller's timeout can abandon them.
async fn discover_repo(dir: &Path) -> Result<RepoFacts> {
    let dir = dir.to_path_buf();
    tokio::task::spawn_blocking(move || read_repo(&dir))
        .await
        .context("Repository reader stopped")?
}

fn read_repo(dir: &Path) -> Result<RepoFacts> {
    let repo = gix::discover(dir).context("Failed to discover repository")?;

    let head = repo.head().context("Failed to read HEAD")?;
    let head_id = head.id();
    let branch = match head.referent_name() {
        Some(name) => name.shorten().to_string(),
        None => head_id
            .map(|id| format!("({})", id.to_hex_with_len(7)))
            .unwrap_or_else(|| "HEAD".to_string()),
    };

    let sha = head_id.map(|id| id.to_hex_with_len(7).to_string());
    let commit_time = repo
        .head_commit()
        .ok()
        .and_then(|commit| commit.time().ok())
        .and_then(|time| u64::try_from(time.seconds).ok());

    let repo_name = repo
        .work_dir()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned());

    Ok(RepoFacts {
        branch,
        sha,
        repo_name,
        git_dir: repo.git_dir().to_path_buf(),
        is_worktree: matches!(repo.kind(), gix::repository::Kind::WorkTree { is_linked: true }),
        commit_time,
    })
}

async fn run_git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = timeout(
        GIT_TIMEOUT,
        Command::new("git").args(args).current_dir(dir).output(),
    )
    .await
    .ok()?
    .ok()?;

    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Marker files git leaves in the git dir while an operation is underway.
pub fn detect_operation(git_dir: &Path) -> Option<String> {
    const MARKERS: [(&str, &str); 6] = [
        ("rebase-merge", "REBASE"),
        ("rebase-apply", "AM/REBASE"),
        ("MERGE_HEAD", "MERGE"),
        ("CHERRY_PICK_HEAD", "CHERRY-PICK"),
        ("REVERT_HEAD", "REVERT"),
        ("BISECT_LOG", "BISECT"),
    ];

    MARKERS
        .iter()
        .find(|(marker, _)| git_dir.join(marker).exists())
        .map(|(_, name)| name.to_string())
}

/// Fold `git status --porcelain=2 --branch` output into `info`.
pub fn apply_porcelain(info: &mut GitInfo, output: &str) {
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("# branch.ab ") {
            let (ahead, behind) = parse_ahead_behind(rest);
            info.ahead = ahead;
            info.behind = behind;
        } else if let Some(upstream) = line.strip_prefix("# branch.upstream ") {
            info.upstream = upstream.split('/').next().map(str::to_string);
        } else if line.starts_with("1 ") || line.starts_with("2 ") {
            let xy = line.get(2..4).unwrap_or("..");
            let mut codes = xy.chars();
            if codes.next().is_some_and(|c| c != '.') {
                info.staged += 1;
            }
            if codes.next().is_some_and(|c| c != '.') {
                info.unstaged += 1;
            }
        } else if line.starts_with("u ") {
            info.conflicts += 1;
        } else if line.starts_with("? ") {
            info.untracked += 1;
        }
    }

    info.status = if info.conflicts > 0 {
        GitStatus::Conflicts
    } else if info.staged + info.unstaged + info.untracked > 0 {
        GitStatus::Dirty
    } else {
        GitStatus::Clean
    };
}

/// `"+2 -1"` into `(2, 1)`.
pub fn parse_ahead_behind(value: &str) -> (u32, u32) {
    let mut parts = value.split_whitespace();
    let ahead = parts
        .next()
        .and_then(|p| p.strip_prefix('+'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);
    let behind = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);
    (ahead, behind)
}

pub fn count_lines(output: &str) -> u32 {
    output.lines().filter(|l| !l.trim().is_empty()).count() as u32
}
