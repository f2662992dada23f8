//! One render pass: resolve colors and symbols once, then format, pack and
//! emit every configured line.

use crate::ansi::emit_line;
use crate::config::{Config, LineConfig};
use crate::error::RenderError;
use crate::layout::compose_lines;
use crate::segments::{render_segment, SegmentContext, SegmentData, SessionFacts};
use crate::symbols::Symbols;
use crate::themes::resolve_theme;
use crate::utils::{debug_with_context, warn, Terminal};

/// Render the whole status line. Fails only on configuration errors that
/// make rendering meaningless; missing facts never fail.
pub fn render(facts: &SessionFacts, config: &Config, terminal: &Terminal) -> Result<String, RenderError> {
    let display = &config.display;
    let level = display.color_compatibility.level(terminal.color_level);

    let resolution = resolve_theme(&config.theme, config.colors.as_ref(), level)?;
    for warning in &resolution.warnings {
        warn(warning);
    }
    let colors = resolution.colors;
    let symbols = Symbols::select(display.style, display.charset);

    let ctx = SegmentContext {
        facts,
        colors: &colors,
        symbols: &symbols,
        budget: config.budget.as_ref(),
    };

    debug_with_context(
        "render",
        &format!(
            "theme={} level={:?} style={:?} width={:?} lines={}",
            config.theme,
            level,
            display.style,
            terminal.width,
            display.lines.len()
        ),
    );

    let mut output = Vec::new();
    for line in &display.lines {
        let segments = render_line(line, &ctx);
        let physical = compose_lines(segments, display.style, display.auto_wrap, terminal.width);

        if physical.is_empty() {
            output.push(String::new());
            continue;
        }
        output.extend(
            physical
                .iter()
                .map(|segments| emit_line(segments, display.style, &colors, &symbols)),
        );
    }

    Ok(output.join("\n"))
}

/// Enabled segments of one configured line, in configured order.
pub fn render_line(line: &LineConfig, ctx: &SegmentContext) -> Vec<SegmentData> {
    line.segments
        .iter()
        .filter(|settings| settings.enabled())
        .filter_map(|settings| render_segment(settings, ctx))
        .collect()
}
