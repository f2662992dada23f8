use crate::config::{ContextConfig, ContextLimits, DEFAULT_CONTEXT_LIMIT};
use crate::segments::format::format_number;
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

#[derive(Debug, Clone, Default)]
pub struct ContextInfo {
    /// Input-side tokens of the most recent assistant turn, cache included.
    pub input_tokens: u64,
}

impl Segment for ContextConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let symbol = ctx.symbols.context_time;
        let Some(info) = &ctx.facts.context else {
            return Some(ctx.segment(SegmentKind::Context, format!("{} 0 (0%)", symbol)));
        };

        let model_id = ctx.facts.model.as_ref().and_then(|m| m.id.as_deref());
        let limit = context_limit(model_id, &self.model_context_limits);
        let pct = context_percentage(info.input_tokens, limit);

        let text = if self.show_percentage_only {
            format!("{} {}%", symbol, pct)
        } else {
            format!("{} {} ({}%)", symbol, format_number(info.input_tokens), pct)
        };

        if pct as f64 >= self.warning_threshold {
            Some(ctx.warning_segment(SegmentKind::Context, text))
        } else {
            Some(ctx.segment(SegmentKind::Context, text))
        }
    }
}

pub fn context_limit(model_id: Option<&str>, limits: &ContextLimits) -> u64 {
    let id = model_id.unwrap_or_default().to_lowercase();
    let by_family = if id.contains("sonnet") {
        limits.sonnet
    } else if id.contains("opus") {
        limits.opus
    } else {
        None
    };

    by_family
        .or(limits.default)
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_CONTEXT_LIMIT)
}

/// Rounded and clamped to `0..=100`.
pub fn context_percentage(tokens: u64, limit: u64) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pct = (tokens as f64 / limit as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::test_support::{colors, render_with};
    use crate::segments::{ModelInfo, SessionFacts};

    fn facts(tokens: u64, model: &str) -> SessionFacts {
        SessionFacts {
            context: Some(ContextInfo { input_tokens: tokens }),
            model: Some(ModelInfo {
                id: Some(model.into()),
                display_name: None,
            }),
            ..SessionFacts::default()
        }
    }

    #[test]
    fn test_null_context() {
        let segment = render_with(&ContextConfig::default(), &SessionFacts::default()).unwrap();
        assert_eq!(segment.text, "◔ 0 (0%)");
    }

    #[test]
    fn test_below_threshold_uses_normal_colors() {
        let segment = render_with(&ContextConfig::default(), &facts(150_000, "claude-sonnet-4")).unwrap();
        assert_eq!(segment.text, "◔ 150.0K (75%)");
        assert_eq!(segment.bg, colors().segment(SegmentKind::Context).bg);
    }

    #[test]
    fn test_warning_threshold_switches_colors() {
        let config = ContextConfig {
            warning_threshold: 70.0,
            ..ContextConfig::default()
        };
        let segment = render_with(&config, &facts(150_000, "claude-sonnet-4")).unwrap();
        assert_eq!(segment.bg, colors().warning.bg);
    }

    #[test]
    fn test_percentage_only_and_clamp() {
        let config = ContextConfig {
            show_percentage_only: true,
            ..ContextConfig::default()
        };
        let segment = render_with(&config, &facts(900_000, "claude-opus-4")).unwrap();
        assert_eq!(segment.text, "◔ 100%");
        assert_eq!(segment.bg, colors().warning.bg);
    }

    #[test]
    fn test_limit_lookup() {
        let limits = ContextLimits {
            sonnet: Some(1_000_000),
            opus: None,
            default: Some(100_000),
        };
        assert_eq!(context_limit(Some("claude-Sonnet-4"), &limits), 1_000_000);
        assert_eq!(context_limit(Some("claude-opus-4"), &limits), 100_000);
        assert_eq!(context_limit(None, &ContextLimits::default()), 200_000);
        assert_eq!(context_percentage(1_000, 0), 0);
    }
}
