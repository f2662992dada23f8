use crate::config::GitConfig;
use crate::segments::format::format_age;
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};
use crate::symbols::Symbols;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitStatus {
    #[default]
    Clean,
    Dirty,
    Conflicts,
}

#[derive(Debug, Clone, Default)]
pub struct GitInfo {
    pub branch: String,
    pub status: GitStatus,
    pub ahead: u32,
    pub behind: u32,
    pub sha: Option<String>,
    pub tag: Option<String>,
    pub staged: u32,
    pub unstaged: u32,
    pub untracked: u32,
    pub conflicts: u32,
    pub stash_count: u32,
    pub upstream: Option<String>,
    pub operation: Option<String>,
    pub repo_name: Option<String>,
    pub is_worktree: bool,
    /// Seconds since the last commit.
    pub time_since_commit: Option<u64>,
}

impl Segment for GitConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let info = ctx.facts.git.as_ref()?;
        Some(ctx.segment(SegmentKind::Git, git_text(info, self, ctx.symbols)))
    }
}

pub fn git_text(info: &GitInfo, config: &GitConfig, symbols: &Symbols) -> String {
    let mut parts = Vec::new();

    if config.show_repo_name {
        if let Some(name) = &info.repo_name {
            if info.is_worktree {
                parts.push(format!("{} {}", name, symbols.git_worktree));
            } else {
                parts.push(name.clone());
            }
        }
    }

    if config.show_operation {
        if let Some(operation) = &info.operation {
            parts.push(format!("[{}]", operation));
        }
    }

    parts.push(format!("{} {}", symbols.branch, info.branch));

    if config.show_tag {
        if let Some(tag) = &info.tag {
            parts.push(format!("{}{}", symbols.git_tag, tag));
        }
    }

    if config.show_sha {
        if let Some(sha) = &info.sha {
            parts.push(format!("{}{}", symbols.git_sha, sha));
        }
    }

    if config.show_ahead_behind {
        if let Some(clause) = ahead_behind(info.ahead, info.behind, symbols) {
            parts.push(clause);
        }
    }

    if config.show_working_tree {
        if let Some(clause) = working_tree(info) {
            parts.push(clause);
        }
    }

    if config.show_upstream {
        if let Some(upstream) = &info.upstream {
            parts.push(format!("{}{}", symbols.git_upstream, upstream));
        }
    }

    if config.show_stash_count && info.stash_count > 0 {
        parts.push(format!("{}{}", symbols.git_stash, info.stash_count));
    }

    if config.show_time_since_commit {
        if let Some(seconds) = info.time_since_commit {
            parts.push(format!("{}{}", symbols.git_time, format_age(seconds)));
        }
    }

    parts.push(
        match info.status {
            GitStatus::Conflicts => symbols.git_conflicts,
            GitStatus::Dirty => symbols.git_dirty,
            GitStatus::Clean => symbols.git_clean,
        }
        .to_string(),
    );

    parts.join(" ")
}

fn ahead_behind(ahead: u32, behind: u32, symbols: &Symbols) -> Option<String> {
    let mut clause = String::new();
    if ahead > 0 {
        clause.push_str(&format!("{}{}", symbols.git_ahead, ahead));
    }
    if behind > 0 {
        clause.push_str(&format!("{}{}", symbols.git_behind, behind));
    }
    (!clause.is_empty()).then_some(clause)
}

fn working_tree(info: &GitInfo) -> Option<String> {
    let counts: Vec<String> = [
        ("+", info.staged),
        ("~", info.unstaged),
        ("?", info.untracked),
        ("!", info.conflicts),
    ]
    .iter()
    .filter(|(_, count)| *count > 0)
    .map(|(marker, count)| format!("{}{}", marker, count))
    .collect();

    (!counts.is_empty()).then(|| format!("({})", counts.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> GitConfig {
        GitConfig {
            show_sha: false,
            show_ahead_behind: true,
            ..GitConfig::default()
        }
    }

    #[test]
    fn test_branch_ahead_dirty() {
        let info = GitInfo {
            branch: "main".into(),
            ahead: 2,
            status: GitStatus::Dirty,
            ..GitInfo::default()
        };
        let symbols = Symbols::unicode();
        assert_eq!(git_text(&info, &quiet_config(), &symbols), "⑂ main ↑2 ●");
    }

    #[test]
    fn test_ahead_behind_merge_into_one_clause() {
        let info = GitInfo {
            branch: "dev".into(),
            ahead: 2,
            behind: 1,
            ..GitInfo::default()
        };
        assert_eq!(git_text(&info, &quiet_config(), &Symbols::unicode()), "⑂ dev ↑2↓1 ✓");

        let behind_only = GitInfo { ahead: 0, ..info };
        assert_eq!(git_text(&behind_only, &quiet_config(), &Symbols::unicode()), "⑂ dev ↓1 ✓");
    }

    #[test]
    fn test_conflicts_win_over_dirty() {
        let info = GitInfo {
            branch: "main".into(),
            status: GitStatus::Conflicts,
            conflicts: 1,
            unstaged: 3,
            ..GitInfo::default()
        };
        let config = GitConfig {
            show_working_tree: true,
            ..quiet_config()
        };
        assert_eq!(git_text(&info, &config, &Symbols::text()), "~ main (~3 !1) !");
    }

    #[test]
    fn test_full_clause_order() {
        let info = GitInfo {
            branch: "feature".into(),
            status: GitStatus::Dirty,
            ahead: 1,
            sha: Some("abc1234".into()),
            tag: Some("v1.2".into()),
            staged: 1,
            untracked: 2,
            stash_count: 3,
            upstream: Some("origin".into()),
            operation: Some("REBASE".into()),
            repo_name: Some("api".into()),
            is_worktree: true,
            time_since_commit: Some(7_200),
            ..GitInfo::default()
        };
        let config = GitConfig {
            enabled: true,
            show_sha: true,
            show_ahead_behind: true,
            show_working_tree: true,
            show_operation: true,
            show_tag: true,
            show_time_since_commit: true,
            show_stash_count: true,
            show_upstream: true,
            show_repo_name: true,
        };
        assert_eq!(
            git_text(&info, &config, &Symbols::unicode()),
            "api ⧉ [REBASE] ⑂ feature ⌂v1.2 ♯abc1234 ↑1 (+1 ?2) →origin ⧇3 ◷2h ●"
        );
    }

    #[test]
    fn test_zero_stash_hidden() {
        let info = GitInfo {
            branch: "main".into(),
            ..GitInfo::default()
        };
        let config = GitConfig {
            show_stash_count: true,
            ..quiet_config()
        };
        assert_eq!(git_text(&info, &config, &Symbols::unicode()), "⑂ main ✓");
    }
}
