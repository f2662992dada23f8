//! Turns a physical line of rendered segments into escape-coded text.

use crate::config::DisplayStyle;
use crate::segments::SegmentData;
use crate::symbols::Symbols;
use crate::themes::{bg_to_fg, ResolvedColors};

pub fn emit_line(
    segments: &[SegmentData],
    style: DisplayStyle,
    colors: &ResolvedColors,
    symbols: &Symbols,
) -> String {
    match style {
        DisplayStyle::Capsule => emit_capsules(segments, colors, symbols),
        DisplayStyle::Powerline | DisplayStyle::Minimal => emit_arrows(segments, colors, symbols),
    }
}

/// Each separator is drawn in the current segment's background over the
/// next segment's background, so the glyph blends the two.
fn emit_arrows(segments: &[SegmentData], colors: &ResolvedColors, symbols: &Symbols) -> String {
    let reset = colors.reset.as_str();
    let mut out = String::from(reset);

    for (idx, segment) in segments.iter().enumerate() {
        let edge = bg_to_fg(&segment.bg, colors.level);
        out.push_str(&segment.bg);
        out.push_str(&segment.fg);
        out.push(' ');
        out.push_str(&segment.text);
        out.push(' ');

        match segments.get(idx + 1) {
            Some(next) => {
                out.push_str(reset);
                out.push_str(&next.bg);
                out.push_str(&edge);
                out.push_str(symbols.right);
            }
            None => {
                out.push_str(reset);
                out.push_str(&edge);
                out.push_str(symbols.right);
                out.push_str(reset);
            }
        }
    }

    out
}

fn emit_capsules(segments: &[SegmentData], colors: &ResolvedColors, symbols: &Symbols) -> String {
    let reset = colors.reset.as_str();
    let capsules: Vec<String> = segments
        .iter()
        .map(|segment| {
            let cap = bg_to_fg(&segment.bg, colors.level);
            format!(
                "{cap}{left}{bg}{fg} {text} {reset}{cap}{right}{reset}",
                left = symbols.left_rounded,
                bg = segment.bg,
                fg = segment.fg,
                text = segment.text,
                right = symbols.right_rounded,
            )
        })
        .collect();

    format!("{}{}", reset, capsules.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Charset;
    use crate::segments::SegmentKind;
    use crate::themes::{resolve_theme, ColorLevel, SegmentColors};

    fn seg(text: &str, bg: &str, fg: &str) -> SegmentData {
        SegmentData::new(
            SegmentKind::Directory,
            text,
            SegmentColors {
                bg: bg.into(),
                fg: fg.into(),
            },
        )
    }

    fn colors(level: ColorLevel) -> ResolvedColors {
        resolve_theme("dark", None, level).unwrap().colors
    }

    #[test]
    fn test_powerline_transitions() {
        let symbols = Symbols::select(DisplayStyle::Powerline, Charset::Unicode);
        let a = seg("a", "\x1b[48;5;1m", "\x1b[38;5;7m");
        let b = seg("b", "\x1b[48;5;2m", "\x1b[38;5;0m");
        let line = emit_line(&[a, b], DisplayStyle::Powerline, &colors(ColorLevel::Ansi256), &symbols);

        assert_eq!(
            line,
            "\x1b[0m\x1b[48;5;1m\x1b[38;5;7m a \x1b[0m\x1b[48;5;2m\x1b[38;5;1m\u{e0b0}\
             \x1b[48;5;2m\x1b[38;5;0m b \x1b[0m\x1b[38;5;2m\u{e0b0}\x1b[0m"
        );
    }

    #[test]
    fn test_ansi16_edge_uses_reduced_palette() {
        let symbols = Symbols::select(DisplayStyle::Powerline, Charset::Text);
        let line = emit_line(
            &[seg("x", "\x1b[44m", "\x1b[97m")],
            DisplayStyle::Powerline,
            &colors(ColorLevel::Ansi),
            &symbols,
        );
        assert_eq!(line, "\x1b[0m\x1b[44m\x1b[97m x \x1b[0m\x1b[34m>\x1b[0m");
    }

    #[test]
    fn test_minimal_has_no_glyph() {
        let symbols = Symbols::select(DisplayStyle::Minimal, Charset::Unicode);
        let line = emit_line(
            &[seg("x", "\x1b[48;2;1;2;3m", "")],
            DisplayStyle::Minimal,
            &colors(ColorLevel::TrueColor),
            &symbols,
        );
        assert_eq!(line, "\x1b[0m\x1b[48;2;1;2;3m x \x1b[0m\x1b[38;2;1;2;3m\x1b[0m");
    }

    #[test]
    fn test_capsules() {
        let symbols = Symbols::select(DisplayStyle::Capsule, Charset::Unicode);
        let a = seg("a", "\x1b[48;5;1m", "\x1b[38;5;7m");
        let b = seg("b", "\x1b[48;5;2m", "\x1b[38;5;0m");
        let line = emit_line(&[a, b], DisplayStyle::Capsule, &colors(ColorLevel::Ansi256), &symbols);

        assert_eq!(
            line,
            "\x1b[0m\x1b[38;5;1m\u{e0b6}\x1b[48;5;1m\x1b[38;5;7m a \x1b[0m\x1b[38;5;1m\u{e0b4}\x1b[0m \
             \x1b[38;5;2m\u{e0b6}\x1b[48;5;2m\x1b[38;5;0m b \x1b[0m\x1b[38;5;2m\u{e0b4}\x1b[0m"
        );
    }

    #[test]
    fn test_no_color_emits_plain_text() {
        let symbols = Symbols::select(DisplayStyle::Powerline, Charset::Text);
        let none = colors(ColorLevel::None);
        let line = emit_line(&[seg("a", "", ""), seg("b", "", "")], DisplayStyle::Powerline, &none, &symbols);
        assert_eq!(line, " a > b >");
        assert!(!line.contains('\x1b'));
    }
}
