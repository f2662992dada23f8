use crate::config::VersionConfig;
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

impl Segment for VersionConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let version = ctx.facts.version.as_deref()?.trim();
        if version.is_empty() {
            return None;
        }
        let version = version.strip_prefix('v').unwrap_or(version);
        Some(ctx.segment(
            SegmentKind::Version,
            format!("{} v{}", ctx.symbols.version, version),
        ))
    }
}
