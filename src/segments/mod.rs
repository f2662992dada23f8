pub mod block;
pub mod context;
pub mod directory;
pub mod format;
pub mod git;
pub mod metrics;
pub mod model;
pub mod session;
pub mod tmux;
pub mod today;
pub mod version;

pub use block::*;
pub use context::*;
pub use directory::*;
pub use git::*;
pub use metrics::*;
pub use model::*;
pub use session::*;
pub use today::*;

use crate::config::{BudgetConfig, SegmentSettings};
use crate::symbols::Symbols;
use crate::themes::{ResolvedColors, SegmentColors};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Directory,
    Git,
    Model,
    Session,
    Tmux,
    Context,
    Metrics,
    Block,
    Today,
    Version,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 10] = [
        SegmentKind::Directory,
        SegmentKind::Git,
        SegmentKind::Model,
        SegmentKind::Session,
        SegmentKind::Tmux,
        SegmentKind::Context,
        SegmentKind::Metrics,
        SegmentKind::Block,
        SegmentKind::Today,
        SegmentKind::Version,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Directory => "directory",
            SegmentKind::Git => "git",
            SegmentKind::Model => "model",
            SegmentKind::Session => "session",
            SegmentKind::Tmux => "tmux",
            SegmentKind::Context => "context",
            SegmentKind::Metrics => "metrics",
            SegmentKind::Block => "block",
            SegmentKind::Today => "today",
            SegmentKind::Version => "version",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SegmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown segment '{}'", s))
    }
}

/// One rendered segment: plain text plus its encoded colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentData {
    pub kind: SegmentKind,
    pub text: String,
    pub bg: String,
    pub fg: String,
}

impl SegmentData {
    pub fn new(kind: SegmentKind, text: impl Into<String>, colors: SegmentColors) -> Self {
        Self {
            kind,
            text: text.into(),
            bg: colors.bg,
            fg: colors.fg,
        }
    }
}

/// Everything the providers learned about the session. Any provider may
/// come back empty; formatters decide between fallback text and suppression.
#[derive(Debug, Clone, Default)]
pub struct SessionFacts {
    pub directory: DirectoryInfo,
    pub git: Option<GitInfo>,
    pub model: Option<ModelInfo>,
    pub session: Option<SessionInfo>,
    pub block: Option<BlockInfo>,
    pub today: Option<TodayInfo>,
    pub context: Option<ContextInfo>,
    pub metrics: Option<MetricsInfo>,
    pub tmux_session: Option<String>,
    pub version: Option<String>,
}

/// Read-only inputs shared by every formatter during one render pass.
pub struct SegmentContext<'a> {
    pub facts: &'a SessionFacts,
    pub colors: &'a ResolvedColors,
    pub symbols: &'a Symbols,
    pub budget: Option<&'a BudgetConfig>,
}

impl<'a> SegmentContext<'a> {
    pub fn segment(&self, kind: SegmentKind, text: impl Into<String>) -> SegmentData {
        SegmentData::new(kind, text, self.colors.segment(kind))
    }

    pub fn warning_segment(&self, kind: SegmentKind, text: impl Into<String>) -> SegmentData {
        SegmentData::new(kind, text, self.colors.warning.clone())
    }
}

/// A segment formatter. `None` suppresses the segment entirely.
pub trait Segment {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData>;
}

pub fn render_segment(settings: &SegmentSettings, ctx: &SegmentContext) -> Option<SegmentData> {
    match settings {
        SegmentSettings::Directory(config) => config.render(ctx),
        SegmentSettings::Git(config) => config.render(ctx),
        SegmentSettings::Model(config) => config.render(ctx),
        SegmentSettings::Session(config) => config.render(ctx),
        SegmentSettings::Tmux(config) => config.render(ctx),
        SegmentSettings::Context(config) => config.render(ctx),
        SegmentSettings::Metrics(config) => config.render(ctx),
        SegmentSettings::Block(config) => config.render(ctx),
        SegmentSettings::Today(config) => config.render(ctx),
        SegmentSettings::Version(config) => config.render(ctx),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::themes::{resolve_theme, ColorLevel};

    pub fn colors() -> ResolvedColors {
        resolve_theme("dark", None, ColorLevel::TrueColor)
            .map(|r| r.colors)
            .unwrap()
    }

    pub fn render_with<S: Segment>(segment: &S, facts: &SessionFacts) -> Option<SegmentData> {
        render_with_budget(segment, facts, None)
    }

    pub fn render_with_budget<S: Segment>(
        segment: &S,
        facts: &SessionFacts,
        budget: Option<&BudgetConfig>,
    ) -> Option<SegmentData> {
        let colors = colors();
        let symbols = Symbols::unicode();
        let ctx = SegmentContext {
            facts,
            colors: &colors,
            symbols: &symbols,
            budget,
        };
        segment.render(&ctx)
    }
}
