//! Width-aware packing of rendered segments into physical lines.

use crate::config::DisplayStyle;
use crate::segments::SegmentData;
use unicode_width::UnicodeWidthStr;

/// Padding on both sides plus the arrow glyph.
const ARROW_OVERHEAD: usize = 3;
/// Padding only; minimal style draws no separator.
const MINIMAL_OVERHEAD: usize = 2;
/// Padding plus both rounded caps.
const CAPSULE_OVERHEAD: usize = 4;
const CAPSULE_GAP: usize = 1;

/// Visible columns a segment occupies once emitted. `leading` marks the
/// first segment on a physical line, which has no capsule gap before it.
pub fn segment_width(segment: &SegmentData, style: DisplayStyle, leading: bool) -> usize {
    let text = segment.text.width();
    match style {
        DisplayStyle::Powerline => text + ARROW_OVERHEAD,
        DisplayStyle::Minimal => text + MINIMAL_OVERHEAD,
        DisplayStyle::Capsule if leading => text + CAPSULE_OVERHEAD,
        DisplayStyle::Capsule => text + CAPSULE_OVERHEAD + CAPSULE_GAP,
    }
}

/// Greedy first-fit packing in configured order. Without auto-wrap or a
/// usable width everything stays on one line; a segment wider than the
/// terminal is placed alone and overflows.
pub fn compose_lines(
    segments: Vec<SegmentData>,
    style: DisplayStyle,
    auto_wrap: bool,
    terminal_width: Option<usize>,
) -> Vec<Vec<SegmentData>> {
    if segments.is_empty() {
        return Vec::new();
    }

    let limit = match terminal_width {
        Some(width) if auto_wrap && width > 0 => width,
        _ => return vec![segments],
    };

    let mut lines = Vec::new();
    let mut current: Vec<SegmentData> = Vec::new();
    let mut running = 0;

    for segment in segments {
        let mut width = segment_width(&segment, style, current.is_empty());
        if !current.is_empty() && running + width > limit {
            lines.push(std::mem::take(&mut current));
            width = segment_width(&segment, style, true);
            running = 0;
        }
        running += width;
        current.push(segment);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
