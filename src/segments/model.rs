use crate::config::ModelConfig;
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

pub const DEFAULT_MODEL_LABEL: &str = "Claude";

#[derive(Debug, Clone, Default)]
pub struct ModelInfo {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

impl ModelInfo {
    /// Prefer the host-provided name, else derive one from the model id.
    pub fn label(&self) -> Option<String> {
        self.display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.id.as_deref().map(display_name_for_id))
    }
}

impl Segment for ModelConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let label = ctx
            .facts
            .model
            .as_ref()
            .and_then(ModelInfo::label)
            .unwrap_or_else(|| DEFAULT_MODEL_LABEL.to_string());

        Some(ctx.segment(
            SegmentKind::Model,
            format!("{} {}", ctx.symbols.model, label),
        ))
    }
}

/// Map model IDs to user-friendly display names
pub fn display_name_for_id(model_id: &str) -> String {
    let lower = model_id.to_lowercase();

    if lower.contains("opus-4-1") {
        "Opus 4.1".to_string()
    } else if lower.contains("opus-4") {
        "Opus 4".to_string()
    } else if lower.contains("opus") {
        "Opus 3".to_string()
    } else if lower.contains("sonnet-4") || lower.contains("4-sonnet") {
        "Sonnet 4".to_string()
    } else if lower.contains("3-7-sonnet") || lower.contains("3.7-sonnet") {
        "Sonnet 3.7".to_string()
    } else if lower.contains("3-5-sonnet") || lower.contains("3.5-sonnet") {
        "Sonnet 3.5".to_string()
    } else if lower.contains("sonnet") {
        "Sonnet".to_string()
    } else if lower.contains("3-5-haiku") || lower.contains("3.5-haiku") {
        "Haiku 3.5".to_string()
    } else if lower.contains("haiku") {
        "Haiku".to_string()
    } else {
        model_id
            .split('-')
            .filter(|s| !s.is_empty() && !s.chars().all(|c| c.is_numeric()))
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(15)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::test_support::render_with;
    use crate::segments::SessionFacts;

    #[test]
    fn test_default_label() {
        let segment = render_with(&ModelConfig::default(), &SessionFacts::default()).unwrap();
        assert_eq!(segment.text, "✱ Claude");
    }

    #[test]
    fn test_display_name_wins() {
        let facts = SessionFacts {
            model: Some(ModelInfo {
                id: Some("claude-opus-4-1-20250805".into()),
                display_name: Some("Opus 4.1 (1M)".into()),
            }),
            ..SessionFacts::default()
        };
        assert_eq!(
            render_with(&ModelConfig::default(), &facts).unwrap().text,
            "✱ Opus 4.1 (1M)"
        );
    }

    #[test]
    fn test_name_from_id() {
        assert_eq!(display_name_for_id("claude-sonnet-4-20250514"), "Sonnet 4");
        assert_eq!(display_name_for_id("claude-3-5-haiku-20241022"), "Haiku 3.5");
        assert_eq!(display_name_for_id("gpt-4o"), "gpt 4o");
    }
}
