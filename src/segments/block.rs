use crate::budget::{evaluate, evaluate_usage, with_budget, BudgetStatus};
use crate::config::{BlockConfig, BlockDisplay, BudgetKind, BurnType};
use crate::segments::format::{
    format_cost, format_cost_rate, format_minutes, format_token_rate, format_tokens,
};
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

/// Aggregates for the currently active five-hour billing block.
#[derive(Debug, Clone, Default)]
pub struct BlockInfo {
    pub cost: Option<f64>,
    pub tokens: Option<u64>,
    pub weighted_tokens: Option<u64>,
    /// Minutes until the block resets.
    pub time_remaining: Option<i64>,
    /// Dollars per hour.
    pub burn_rate: Option<f64>,
    /// Tokens per hour.
    pub token_burn_rate: Option<f64>,
}

impl BlockInfo {
    pub fn has_usage(&self) -> bool {
        self.cost.is_some() || self.tokens.is_some()
    }
}

impl Segment for BlockConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let symbol = ctx.symbols.block_cost;
        let info = match ctx.facts.block.as_ref().filter(|b| b.has_usage()) {
            Some(info) => info,
            None => {
                return Some(ctx.segment(
                    SegmentKind::Block,
                    format!("{} No active block", symbol),
                ))
            }
        };

        let budget = ctx.budget.and_then(|b| b.block.as_ref());
        let display = match (self.display_type, info.time_remaining) {
            (BlockDisplay::Time, None) => BlockDisplay::Cost,
            (display, _) => display,
        };

        let cost = info.cost.unwrap_or(0.0);
        let tokens = info.tokens.unwrap_or(0);
        let (primary, status) = match display {
            BlockDisplay::Cost => (
                format_cost(cost),
                evaluate_usage(info.cost, info.tokens, budget),
            ),
            BlockDisplay::Tokens => (
                format_tokens(tokens),
                evaluate_usage(info.cost, info.tokens, budget),
            ),
            BlockDisplay::Both => (
                format!("{} ({})", format_cost(cost), format_tokens(tokens)),
                evaluate_usage(info.cost, info.tokens, budget),
            ),
            BlockDisplay::Weighted => {
                let weighted = info.weighted_tokens.or(info.tokens).unwrap_or(0);
                let status = match budget {
                    Some(b) if b.budget_type == Some(BudgetKind::Tokens) => {
                        evaluate(weighted as f64, Some(b.amount), b.warning_threshold)
                    }
                    _ => evaluate_usage(info.cost, info.tokens, budget),
                };
                (format!("{} (weighted)", format_tokens(weighted)), status)
            }
            BlockDisplay::Time => (
                format_minutes(info.time_remaining.unwrap_or(0)),
                BudgetStatus::NONE,
            ),
        };

        let mut text = with_budget(format!("{} {}", symbol, primary), &status, ctx.symbols);

        if display != BlockDisplay::Time {
            if let Some(minutes) = info.time_remaining {
                text.push_str(&format!(" ({})", format_minutes(minutes)));
            }
        }

        if let Some(burn) = burn_text(self.burn_type, info) {
            text.push_str(&format!(" {}{}", ctx.symbols.metrics_burn, burn));
        }

        Some(ctx.segment(SegmentKind::Block, text))
    }
}

fn burn_text(burn_type: BurnType, info: &BlockInfo) -> Option<String> {
    let cost = info.burn_rate.map(format_cost_rate);
    let tokens = info.token_burn_rate.map(format_token_rate);

    match burn_type {
        BurnType::None => None,
        BurnType::Cost => cost,
        BurnType::Tokens => tokens,
        BurnType::Both => match (cost, tokens) {
            (Some(c), Some(t)) => Some(format!("{} {}", c, t)),
            (c, t) => c.or(t),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BudgetAmount, BudgetConfig};
    use crate::segments::test_support::{render_with, render_with_budget};
    use crate::segments::SessionFacts;

    fn facts(info: BlockInfo) -> SessionFacts {
        SessionFacts {
            block: Some(info),
            ..SessionFacts::default()
        }
    }

    fn config(display_type: BlockDisplay, burn_type: BurnType) -> BlockConfig {
        BlockConfig {
            enabled: true,
            display_type,
            burn_type,
        }
    }

    #[test]
    fn test_no_active_block() {
        let empty = BlockConfig::default();
        assert_eq!(
            render_with(&empty, &SessionFacts::default()).unwrap().text,
            "◱ No active block"
        );
        assert_eq!(
            render_with(&empty, &facts(BlockInfo::default())).unwrap().text,
            "◱ No active block"
        );
    }

    #[test]
    fn test_cost_with_remaining_and_burn() {
        let info = BlockInfo {
            cost: Some(3.5),
            tokens: Some(40_000),
            time_remaining: Some(135),
            burn_rate: Some(0.45),
            ..BlockInfo::default()
        };
        let segment = render_with(&config(BlockDisplay::Cost, BurnType::Cost), &facts(info)).unwrap();
        assert_eq!(segment.text, "◱ $3.50 (2h 15m) ⟢45¢/h");
    }

    #[test]
    fn test_time_mode_stands_alone() {
        let info = BlockInfo {
            cost: Some(1.0),
            time_remaining: Some(45),
            ..BlockInfo::default()
        };
        let segment = render_with(&config(BlockDisplay::Time, BurnType::None), &facts(info)).unwrap();
        assert_eq!(segment.text, "◱ 45m");
    }

    #[test]
    fn test_time_mode_without_remaining_falls_back_to_cost() {
        let info = BlockInfo {
            cost: Some(1.0),
            ..BlockInfo::default()
        };
        let segment = render_with(&config(BlockDisplay::Time, BurnType::None), &facts(info)).unwrap();
        assert_eq!(segment.text, "◱ $1.00");
    }

    #[test]
    fn test_weighted_uses_token_budget() {
        let info = BlockInfo {
            cost: Some(50.0),
            tokens: Some(100_000),
            weighted_tokens: Some(450_000),
            ..BlockInfo::default()
        };
        let budget = BudgetConfig {
            block: Some(BudgetAmount {
                amount: 500_000.0,
                budget_type: Some(BudgetKind::Tokens),
                warning_threshold: None,
            }),
            ..BudgetConfig::default()
        };
        let segment = render_with_budget(
            &config(BlockDisplay::Weighted, BurnType::None),
            &facts(info),
            Some(&budget),
        )
        .unwrap();
        assert_eq!(segment.text, "◱ 450.0K tokens (weighted) !90%");
    }

    #[test]
    fn test_both_burn_rates() {
        let info = BlockInfo {
            tokens: Some(2_000),
            burn_rate: Some(2.5),
            token_burn_rate: Some(12_000.0),
            ..BlockInfo::default()
        };
        let segment = render_with(&config(BlockDisplay::Tokens, BurnType::Both), &facts(info)).unwrap();
        assert_eq!(segment.text, "◱ 2.0K tokens ⟢$2.50/h 12.0K/h");
    }
}
