use crate::config::{Charset, DisplayStyle};

/// Glyphs used by the formatters and the emitter. Selected once per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
    pub right: &'static str,
    pub left_rounded: &'static str,
    pub right_rounded: &'static str,
    pub branch: &'static str,
    pub model: &'static str,
    pub git_clean: &'static str,
    pub git_dirty: &'static str,
    pub git_conflicts: &'static str,
    pub git_ahead: &'static str,
    pub git_behind: &'static str,
    pub git_worktree: &'static str,
    pub git_tag: &'static str,
    pub git_sha: &'static str,
    pub git_upstream: &'static str,
    pub git_stash: &'static str,
    pub git_time: &'static str,
    pub session_cost: &'static str,
    pub block_cost: &'static str,
    pub today_cost: &'static str,
    pub context_time: &'static str,
    pub metrics_response: &'static str,
    pub metrics_last_response: &'static str,
    pub metrics_duration: &'static str,
    pub metrics_messages: &'static str,
    pub metrics_lines_added: &'static str,
    pub metrics_lines_removed: &'static str,
    pub metrics_burn: &'static str,
    pub version: &'static str,
    pub budget_warning: &'static str,
    pub budget_exceeded: &'static str,
}

impl Symbols {
    pub fn select(style: DisplayStyle, charset: Charset) -> Self {
        let mut symbols = match charset {
            Charset::Unicode => Self::unicode(),
            Charset::Text => Self::text(),
        };
        if style == DisplayStyle::Minimal {
            symbols.right = "";
        }
        symbols
    }

    pub fn unicode() -> Self {
        Self {
            right: "\u{e0b0}",
            left_rounded: "\u{e0b6}",
            right_rounded: "\u{e0b4}",
            branch: "⑂",
            model: "✱",
            git_clean: "✓",
            git_dirty: "●",
            git_conflicts: "⚠",
            git_ahead: "↑",
            git_behind: "↓",
            git_worktree: "⧉",
            git_tag: "⌂",
            git_sha: "♯",
            git_upstream: "→",
            git_stash: "⧇",
            git_time: "◷",
            session_cost: "§",
            block_cost: "◱",
            today_cost: "☉",
            context_time: "◔",
            metrics_response: "⧖",
            metrics_last_response: "Δ",
            metrics_duration: "⧗",
            metrics_messages: "⟐",
            metrics_lines_added: "+",
            metrics_lines_removed: "-",
            metrics_burn: "⟢",
            version: "◈",
            budget_warning: "!",
            budget_exceeded: "⚠",
        }
    }

    pub fn text() -> Self {
        Self {
            right: ">",
            left_rounded: "(",
            right_rounded: ")",
            branch: "~",
            model: "M",
            git_clean: "=",
            git_dirty: "*",
            git_conflicts: "!",
            git_ahead: "^",
            git_behind: "v",
            git_worktree: "W",
            git_tag: "T",
            git_sha: "#",
            git_upstream: "u:",
            git_stash: "S",
            git_time: "@",
            session_cost: "S",
            block_cost: "B",
            today_cost: "D",
            context_time: "C",
            metrics_response: "R",
            metrics_last_response: "L",
            metrics_duration: "T",
            metrics_messages: "#",
            metrics_lines_added: "+",
            metrics_lines_removed: "-",
            metrics_burn: "~",
            version: "V",
            budget_warning: "!",
            budget_exceeded: "!!",
        }
    }
}
