use crate::config::{BudgetAmount, BudgetKind};
use crate::symbols::Symbols;

pub const DEFAULT_WARNING_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    None,
    Ok,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub tier: BudgetTier,
    /// Unclamped, so values past the ceiling stay distinguishable.
    pub percentage: Option<f64>,
}

impl BudgetStatus {
    pub const NONE: BudgetStatus = BudgetStatus {
        tier: BudgetTier::None,
        percentage: None,
    };

    pub fn suffix(&self, symbols: &Symbols) -> String {
        let Some(pct) = self.percentage else {
            return String::new();
        };
        let pct = pct.max(0.0).round();
        match self.tier {
            BudgetTier::None => String::new(),
            BudgetTier::Ok => format!(" {:.0}%", pct),
            BudgetTier::Warning => format!(" {}{:.0}%", symbols.budget_warning, pct),
            BudgetTier::Exceeded => format!(" {}{:.0}%", symbols.budget_exceeded, pct),
        }
    }
}

/// Classify `value` against `ceiling`. A missing or non-positive ceiling
/// disables the budget entirely.
pub fn evaluate(value: f64, ceiling: Option<f64>, warning_threshold: Option<f64>) -> BudgetStatus {
    let ceiling = match ceiling {
        Some(c) if c > 0.0 => c,
        _ => return BudgetStatus::NONE,
    };
    let threshold = warning_threshold.unwrap_or(DEFAULT_WARNING_THRESHOLD);

    // Compared without dividing so the exact threshold boundary is stable.
    let tier = if value >= ceiling {
        BudgetTier::Exceeded
    } else if value * 100.0 >= ceiling * threshold {
        BudgetTier::Warning
    } else {
        BudgetTier::Ok
    };

    BudgetStatus {
        tier,
        percentage: Some(value / ceiling * 100.0),
    }
}

/// Pick the budgeted quantity: explicit kind first, else cost when known.
pub fn evaluate_usage(
    cost: Option<f64>,
    tokens: Option<u64>,
    budget: Option<&BudgetAmount>,
) -> BudgetStatus {
    let Some(budget) = budget else {
        return BudgetStatus::NONE;
    };

    let value = match budget.budget_type {
        Some(BudgetKind::Cost) => cost,
        Some(BudgetKind::Tokens) => tokens.map(|t| t as f64),
        None => cost.or(tokens.map(|t| t as f64)),
    };

    match value {
        Some(v) => evaluate(v, Some(budget.amount), budget.warning_threshold),
        None => BudgetStatus::NONE,
    }
}

/// Append the budget suffix to `base`; unchanged when no budget applies.
pub fn with_budget(base: String, status: &BudgetStatus, symbols: &Symbols) -> String {
    base + &status.suffix(symbols)
}
