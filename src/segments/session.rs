use crate::budget::{evaluate_usage, with_budget};
use crate::config::{SessionConfig, UsageDisplay};
use crate::providers::TokenBreakdown;
use crate::segments::format::{format_breakdown, format_cost, format_tokens};
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
    pub cost: Option<f64>,
    pub tokens: Option<u64>,
    pub breakdown: Option<TokenBreakdown>,
}

impl Segment for SessionConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let info = ctx.facts.session.clone().unwrap_or_default();
        let display = self.display_type.unwrap_or(UsageDisplay::Tokens);
        let status = evaluate_usage(
            info.cost,
            info.tokens,
            ctx.budget.and_then(|b| b.session.as_ref()),
        );

        let base = usage_text(info.cost, info.tokens, info.breakdown.as_ref(), display);
        let text = with_budget(
            format!("{} {}", ctx.symbols.session_cost, base),
            &status,
            ctx.symbols,
        );
        Some(ctx.segment(SegmentKind::Session, text))
    }
}

/// Unknown values render as zero rather than suppressing the segment.
pub(crate) fn usage_text(
    cost: Option<f64>,
    tokens: Option<u64>,
    breakdown: Option<&TokenBreakdown>,
    display: UsageDisplay,
) -> String {
    let cost = cost.unwrap_or(0.0);
    let tokens = tokens.unwrap_or(0);

    match display {
        UsageDisplay::Cost => format_cost(cost),
        UsageDisplay::Tokens => format_tokens(tokens),
        UsageDisplay::Both => format!("{} ({})", format_cost(cost), format_tokens(tokens)),
        UsageDisplay::Breakdown => match breakdown {
            Some(b) => format_breakdown(b),
            None => format_tokens(tokens),
        },
    }
}
