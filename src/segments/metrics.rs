use crate::config::MetricsConfig;
use crate::segments::format::{format_duration, format_response_time};
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};

#[derive(Debug, Clone, Default)]
pub struct MetricsInfo {
    /// Mean seconds between a user message and the assistant reply.
    pub response_time: Option<f64>,
    pub last_response_time: Option<f64>,
    /// Seconds from the first to the last transcript entry.
    pub session_duration: Option<f64>,
    pub message_count: Option<u32>,
    pub lines_added: Option<u64>,
    pub lines_removed: Option<u64>,
}

impl Segment for MetricsConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let symbols = ctx.symbols;
        let Some(info) = &ctx.facts.metrics else {
            return Some(ctx.segment(
                SegmentKind::Metrics,
                format!("{} new", symbols.metrics_response),
            ));
        };

        // Every clause, not only the line counts, is dropped at zero.
        let mut parts = Vec::new();

        if self.show_last_response_time {
            if let Some(secs) = info.last_response_time.filter(|s| *s > 0.0) {
                parts.push(format!("{} {}", symbols.metrics_last_response, format_response_time(secs)));
            }
        }
        if self.show_response_time {
            if let Some(secs) = info.response_time.filter(|s| *s > 0.0) {
                parts.push(format!("{} {}", symbols.metrics_response, format_response_time(secs)));
            }
        }
        if self.show_duration {
            if let Some(secs) = info.session_duration.filter(|s| *s > 0.0) {
                parts.push(format!("{} {}", symbols.metrics_duration, format_duration(secs)));
            }
        }
        if self.show_message_count {
            if let Some(count) = info.message_count.filter(|c| *c > 0) {
                parts.push(format!("{} {}", symbols.metrics_messages, count));
            }
        }
        if self.show_lines_added {
            if let Some(lines) = info.lines_added.filter(|l| *l > 0) {
                parts.push(format!("{}{}", symbols.metrics_lines_added, lines));
            }
        }
        if self.show_lines_removed {
            if let Some(lines) = info.lines_removed.filter(|l| *l > 0) {
                parts.push(format!("{}{}", symbols.metrics_lines_removed, lines));
            }
        }

        let text = if parts.is_empty() {
            format!("{} active", symbols.metrics_response)
        } else {
            parts.join(" ")
        };
        Some(ctx.segment(SegmentKind::Metrics, text))
    }
}
