//! Pure aggregation from transcript entries to the facts segments consume.

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::providers::pricing::PricingService;
use crate::providers::transcript::TranscriptEntry;
use crate::segments::{BlockInfo, ContextInfo, MetricsInfo, SessionInfo, TodayInfo};

/// Billing blocks span five hours from the hour of their first entry.
pub const BLOCK_HOURS: i64 = 5;

pub fn session_usage(entries: &[TranscriptEntry], pricing: &PricingService) -> SessionInfo {
    let breakdown = pricing.token_breakdown(entries);
    SessionInfo {
        cost: Some(pricing.total_cost(entries)),
        tokens: Some(breakdown.total_tokens()),
        breakdown: Some(breakdown),
    }
}

/// Usage stamped at or after `day_start`.
pub fn today_usage(
    entries: &[TranscriptEntry],
    day_start: DateTime<Utc>,
    pricing: &PricingService,
) -> TodayInfo {
    let today: Vec<TranscriptEntry> = entries
        .iter()
        .filter(|e| e.timestamp >= day_start)
        .cloned()
        .collect();
    let breakdown = pricing.token_breakdown(&today);
    TodayInfo {
        cost: Some(pricing.total_cost(&today)),
        tokens: Some(breakdown.total_tokens()),
        breakdown: Some(breakdown),
    }
}

fn floor_to_hour(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .duration_trunc(Duration::hours(1))
        .unwrap_or(timestamp)
}

/// Split time-sorted entries into billing blocks. A new block starts when
/// an entry falls past the current block's end or after a five-hour gap.
pub fn identify_blocks(entries: &[TranscriptEntry]) -> Vec<&[TranscriptEntry]> {
    let block_length = Duration::hours(BLOCK_HOURS);
    let mut blocks = Vec::new();
    let mut start_idx = 0;
    let mut block_start: Option<DateTime<Utc>> = None;

    for (idx, entry) in entries.iter().enumerate() {
        let Some(start) = block_start else {
            block_start = Some(floor_to_hour(entry.timestamp));
            continue;
        };

        let since_start = entry.timestamp - start;
        let since_last = entry.timestamp - entries[idx - 1].timestamp;
        if since_start > block_length || since_last > block_length {
            blocks.push(&entries[start_idx..idx]);
            start_idx = idx;
            block_start = Some(floor_to_hour(entry.timestamp));
        }
    }

    if start_idx < entries.len() {
        blocks.push(&entries[start_idx..]);
    }
    blocks
}

/// Most recent block that is still open at `now`.
pub fn active_block(entries: &[TranscriptEntry], now: DateTime<Utc>) -> Option<&[TranscriptEntry]> {
    let block_length = Duration::hours(BLOCK_HOURS);

    identify_blocks(entries).into_iter().rev().find(|block| {
        let (Some(first), Some(last)) = (block.first(), block.last()) else {
            return false;
        };
        let block_end = floor_to_hour(first.timestamp) + block_length;
        now - last.timestamp < block_length && now < block_end
    })
}

pub fn block_usage(
    entries: &[TranscriptEntry],
    now: DateTime<Utc>,
    pricing: &PricingService,
) -> Option<BlockInfo> {
    let block = active_block(entries, now)?;
    let (first, last) = (block.first()?, block.last()?);

    let cost = pricing.total_cost(block);
    let tokens = pricing.token_breakdown(block).total_tokens();
    let weighted = pricing.weighted_tokens(block);

    let reset_time = floor_to_hour(first.timestamp) + Duration::hours(BLOCK_HOURS);
    let time_remaining = (reset_time - now).num_minutes().max(0);

    let active_minutes = (last.timestamp - first.timestamp).num_minutes();
    let (burn_rate, token_burn_rate) = if active_minutes > 0 {
        let hours = active_minutes as f64 / 60.0;
        (
            (cost > 0.0).then(|| cost / hours),
            (tokens > 0).then(|| tokens as f64 / hours),
        )
    } else {
        (None, None)
    };

    Some(BlockInfo {
        cost: (cost > 0.0).then_some(cost),
        tokens: (tokens > 0).then_some(tokens),
        weighted_tokens: (weighted > 0).then_some(weighted),
        time_remaining: Some(time_remaining),
        burn_rate,
        token_burn_rate,
    })
}

/// Context fill from the latest main-chain assistant turn with usage.
pub fn context_usage(entries: &[TranscriptEntry]) -> Option<ContextInfo> {
    entries
        .iter()
        .rev()
        .filter(|e| !e.is_sidechain() && e.is_assistant())
        .find_map(|e| e.usage())
        .map(|usage| ContextInfo {
            input_tokens: usage.context_tokens(),
        })
}

/// Response times pair each user message with the next assistant entry.
pub fn session_metrics(entries: &[TranscriptEntry]) -> Option<MetricsInfo> {
    let main: Vec<&TranscriptEntry> = entries.iter().filter(|e| !e.is_sidechain()).collect();
    let (first, last) = (main.first()?, main.last()?);

    let mut response_times = Vec::new();
    let mut pending_user: Option<DateTime<Utc>> = None;
    for entry in &main {
        if entry.is_user() {
            pending_user = Some(entry.timestamp);
        } else if entry.is_assistant() {
            if let Some(asked) = pending_user.take() {
                let secs = (entry.timestamp - asked).num_milliseconds() as f64 / 1000.0;
                if secs > 0.0 {
                    response_times.push(secs);
                }
            }
        }
    }

    let response_time = (!response_times.is_empty())
        .then(|| response_times.iter().sum::<f64>() / response_times.len() as f64);
    let duration = (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0;
    let message_count = main.iter().filter(|e| e.is_user()).count() as u32;

    Some(MetricsInfo {
        response_time,
        last_response_time: response_times.last().copied(),
        session_duration: (duration > 0.0).then_some(duration),
        message_count: Some(message_count),
        lines_added: None,
        lines_removed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::transcript::parse_jsonl_line;

    fn assistant(ts: &str, id: &str, model: &str, input: u64, output: u64) -> TranscriptEntry {
        parse_jsonl_line(&format!(
            r#"{{"type":"assistant","timestamp":"{}","requestId":"r{}","message":{{"id":"{}","model":"{}","usage":{{"input_tokens":{},"output_tokens":{}}}}}}}"#,
            ts, id, id, model, input, output
        ))
        .unwrap()
    }

    fn user(ts: &str) -> TranscriptEntry {
        parse_jsonl_line(&format!(
            r#"{{"type":"user","timestamp":"{}","message":{{"role":"user","content":"go"}}}}"#,
            ts
        ))
        .unwrap()
    }

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    #[test]
    fn test_blocks_split_on_window_and_gap() {
        let entries = vec![
            assistant("2025-01-10T09:30:00Z", "a", "claude-sonnet-4", 10, 10),
            assistant("2025-01-10T13:59:00Z", "b", "claude-sonnet-4", 10, 10),
            // 14:05 is past the 09:00-14:00 window.
            assistant("2025-01-10T14:05:00Z", "c", "claude-sonnet-4", 10, 10),
            // More than five hours after the previous entry.
            assistant("2025-01-10T19:30:00Z", "d", "claude-sonnet-4", 10, 10),
        ];
        let blocks = identify_blocks(&entries);
        assert_eq!(blocks.iter().map(|b| b.len()).collect::<Vec<_>>(), vec![2, 1, 1]);
    }

    #[test]
    fn test_active_block_info() {
        let pricing = PricingService::new();
        let entries = vec![
            assistant("2025-01-10T10:10:00Z", "a", "claude-opus-4", 1_000, 0),
            assistant("2025-01-10T11:10:00Z", "b", "claude-sonnet-4", 1_000, 0),
        ];

        let info = block_usage(&entries, at("2025-01-10T12:00:00Z"), &pricing).unwrap();
        assert_eq!(info.tokens, Some(2_000));
        assert_eq!(info.weighted_tokens, Some(6_000));
        assert_eq!(info.time_remaining, Some(180));
        assert_eq!(info.token_burn_rate, Some(2_000.0));

        assert!(block_usage(&entries, at("2025-01-10T15:30:00Z"), &pricing).is_none());
    }

    #[test]
    fn test_today_filters_by_day_start() {
        let pricing = PricingService::new();
        let entries = vec![
            assistant("2025-01-09T23:00:00Z", "a", "claude-sonnet-4", 500, 0),
            assistant("2025-01-10T01:00:00Z", "b", "claude-sonnet-4", 700, 0),
        ];
        let today = today_usage(&entries, at("2025-01-10T00:00:00Z"), &pricing);
        assert_eq!(today.tokens, Some(700));
    }

    #[test]
    fn test_context_uses_latest_turn() {
        let entries = vec![
            assistant("2025-01-10T10:00:00Z", "a", "claude-sonnet-4", 1_000, 50),
            assistant("2025-01-10T10:01:00Z", "b", "claude-sonnet-4", 4_000, 50),
        ];
        assert_eq!(context_usage(&entries).map(|c| c.input_tokens), Some(4_000));
        assert!(context_usage(&[]).is_none());
    }

    #[test]
    fn test_metrics() {
        let entries = vec![
            user("2025-01-10T10:00:00Z"),
            assistant("2025-01-10T10:00:04Z", "a", "claude-sonnet-4", 1, 1),
            user("2025-01-10T10:01:00Z"),
            assistant("2025-01-10T10:01:02Z", "b", "claude-sonnet-4", 1, 1),
        ];
        let metrics = session_metrics(&entries).unwrap();
        assert_eq!(metrics.response_time, Some(3.0));
        assert_eq!(metrics.last_response_time, Some(2.0));
        assert_eq!(metrics.session_duration, Some(62.0));
        assert_eq!(metrics.message_count, Some(2));
        assert!(session_metrics(&[]).is_none());
    }
}
