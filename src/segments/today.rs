use crate::budget::{evaluate_usage, with_budget};
use crate::config::{TodayConfig, UsageDisplay};
use crate::providers::TokenBreakdown;
use crate::segments::session::usage_text;
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

#[derive(Debug, Clone, Default)]
pub struct TodayInfo {
    pub cost: Option<f64>,
    pub tokens: Option<u64>,
    pub breakdown: Option<TokenBreakdown>,
}

impl Segment for TodayConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let info = ctx.facts.today.clone().unwrap_or_default();
        let display = self.display_type.unwrap_or(UsageDisplay::Cost);
        let status = evaluate_usage(
            info.cost,
            info.tokens,
            ctx.budget.and_then(|b| b.today.as_ref()),
        );

        let base = usage_text(info.cost, info.tokens, info.breakdown.as_ref(), display);
        let text = with_budget(
            format!("{} {}", ctx.symbols.today_cost, base),
            &status,
            ctx.symbols,
        );
        Some(ctx.segment(SegmentKind::Today, text))
    }
}
