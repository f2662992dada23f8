use crate::themes::ColorLevel;
use std::env;

/// Terminal facts handed to the renderer. The engine never probes the
/// terminal itself; the binary fills this in from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub color_level: ColorLevel,
    pub width: Option<usize>,
}

impl Terminal {
    pub fn new(color_level: ColorLevel, width: Option<usize>) -> Self {
        Self { color_level, width }
    }

    pub fn detect(width_override: Option<usize>) -> Self {
        Self {
            color_level: detect_color_level(),
            width: width_override.filter(|w| *w > 0).or_else(detect_width),
        }
    }
}

pub fn detect_color_level() -> ColorLevel {
    color_level_from_env(
        env::var("NO_COLOR").ok().as_deref(),
        env::var("COLORTERM").ok().as_deref(),
        env::var("TERM").ok().as_deref(),
    )
}

/// Status line hosts usually pipe our stdout, so a missing `TERM` is
/// treated as a capable terminal rather than a dumb one.
pub fn color_level_from_env(
    no_color: Option<&str>,
    colorterm: Option<&str>,
    term: Option<&str>,
) -> ColorLevel {
    if no_color.is_some() || term == Some("dumb") {
        return ColorLevel::None;
    }

    if colorterm.map_or(false, |ct| ct.contains("truecolor") || ct.contains("24bit")) {
        return ColorLevel::TrueColor;
    }

    match term {
        Some(t) if t.contains("256") || t == "xterm-kitty" || t == "alacritty" => {
            ColorLevel::Ansi256
        }
        Some(t) if !t.is_empty() => ColorLevel::Ansi,
        _ => ColorLevel::Ansi256,
    }
}

pub fn detect_width() -> Option<usize> {
    env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
}
