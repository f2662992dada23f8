use crate::config::TmuxConfig;
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

impl Segment for TmuxConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let session = ctx
            .facts
            .tmux_session
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or("none");
        Some(ctx.segment(SegmentKind::Tmux, format!("tmux:{}", session)))
    }
}
