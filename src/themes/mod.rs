pub mod colors;

pub use colors::*;

use crate::config::ThemeColors;
use crate::error::RenderError;
use crate::segments::SegmentKind;
use std::collections::HashMap;

pub const DEFAULT_THEME: &str = "dark";
pub const CUSTOM_THEME: &str = "custom";

const DEFAULT_WARNING: (&str, &str) = ("#cc0000", "#ffffff");

/// A theme as authored: hex `(bg, fg)` pairs per segment category.
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: HashMap<SegmentKind, (String, String)>,
    pub warning: Option<(String, String)>,
}

impl Theme {
    fn from_table(table: &[(SegmentKind, &str, &str)], warning: Option<(&str, &str)>) -> Self {
        Self {
            colors: table
                .iter()
                .map(|(kind, bg, fg)| (*kind, (bg.to_string(), fg.to_string())))
                .collect(),
            warning: warning.map(|(bg, fg)| (bg.to_string(), fg.to_string())),
        }
    }

    fn from_custom(custom: &HashMap<String, ThemeColors>) -> Self {
        let fallback = dark_theme();
        let colors = SegmentKind::ALL
            .iter()
            .map(|kind| {
                let pair = custom
                    .get(kind.as_str())
                    .map(|c| (c.bg.clone(), c.fg.clone()))
                    .or_else(|| fallback.colors.get(kind).cloned())
                    .unwrap_or_default();
                (*kind, pair)
            })
            .collect();

        Self {
            colors,
            warning: custom.get("warning").map(|c| (c.bg.clone(), c.fg.clone())),
        }
    }

    pub fn get_colors(&self, segment: SegmentKind) -> Option<&(String, String)> {
        self.colors.get(&segment)
    }
}

/// Escape codes for one segment, already encoded for the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentColors {
    pub bg: String,
    pub fg: String,
}

/// Per-render color table, encoded once and threaded through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColors {
    pub level: ColorLevel,
    pub reset: String,
    pub warning: SegmentColors,
    segments: HashMap<SegmentKind, SegmentColors>,
}

impl ResolvedColors {
    pub fn encode(theme: &Theme, level: ColorLevel) -> Self {
        let pair = |(bg, fg): &(String, String)| SegmentColors {
            bg: encode_bg(bg, level),
            fg: encode_fg(fg, level),
        };

        let warning = theme
            .warning
            .clone()
            .unwrap_or_else(|| (DEFAULT_WARNING.0.to_string(), DEFAULT_WARNING.1.to_string()));

        Self {
            level,
            reset: level.reset().to_string(),
            warning: pair(&warning),
            segments: theme
                .colors
                .iter()
                .map(|(kind, colors)| (*kind, pair(colors)))
                .collect(),
        }
    }

    pub fn segment(&self, kind: SegmentKind) -> SegmentColors {
        self.segments.get(&kind).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ThemeResolution {
    pub colors: ResolvedColors,
    pub warnings: Vec<String>,
}

/// Resolve a theme name at a color level.
///
/// Selecting the custom theme without a color table is fatal. An unknown
/// built-in name falls back to the default theme with a warning.
pub fn resolve_theme(
    name: &str,
    custom: Option<&HashMap<String, ThemeColors>>,
    level: ColorLevel,
) -> Result<ThemeResolution, RenderError> {
    let mut warnings = Vec::new();

    let theme = if name == CUSTOM_THEME {
        let table = custom.ok_or(RenderError::MissingCustomColors)?;
        Theme::from_custom(table)
    } else {
        match variant_for_level(name, level) {
            Some(theme) => theme,
            None => {
                warnings.push(format!(
                    "unknown theme '{}', falling back to '{}'",
                    name, DEFAULT_THEME
                ));
                default_theme(level)
            }
        }
    };

    Ok(ThemeResolution {
        colors: ResolvedColors::encode(&theme, level),
        warnings,
    })
}

fn variant_for_level(name: &str, level: ColorLevel) -> Option<Theme> {
    let variant = match level {
        ColorLevel::None | ColorLevel::Ansi => Some(format!("{}-ansi", name)),
        ColorLevel::Ansi256 => Some(format!("{}-ansi256", name)),
        ColorLevel::TrueColor => None,
    };

    variant
        .and_then(|v| get_theme(&v))
        .or_else(|| get_theme(name))
}

/// The default theme is always built in, so this cannot fail.
fn default_theme(level: ColorLevel) -> Theme {
    variant_for_level(DEFAULT_THEME, level).unwrap_or_else(dark_theme)
}

pub fn get_theme(name: &str) -> Option<Theme> {
    match name {
        "dark" => Some(dark_theme()),
        "dark-ansi" => Some(dark_ansi_theme()),
        "dark-ansi256" => Some(dark_ansi256_theme()),
        "light" => Some(light_theme()),
        "light-ansi" => Some(light_ansi_theme()),
        "nord" => Some(nord_theme()),
        "tokyo-night" => Some(tokyo_night_theme()),
        "rose-pine" => Some(rose_pine_theme()),
        _ => None,
    }
}

pub fn builtin_theme_names() -> &'static [&'static str] {
    &["dark", "light", "nord", "tokyo-night", "rose-pine"]
}

use SegmentKind::*;

fn dark_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#8b4513", "#ffffff"),
            (Git, "#404040", "#ffffff"),
            (Model, "#2d2d2d", "#ffffff"),
            (Session, "#202020", "#00ffff"),
            (Block, "#2a2a2a", "#87ceeb"),
            (Today, "#1a1a1a", "#98fb98"),
            (Tmux, "#2f4f2f", "#90ee90"),
            (Context, "#4a5568", "#cbd5e0"),
            (Metrics, "#374151", "#d1d5db"),
            (Version, "#3a3a4a", "#b8b8d0"),
        ],
        Some(("#a52a2a", "#ffffff")),
    )
}

fn dark_ansi_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#cd0000", "#ffffff"),
            (Git, "#7f7f7f", "#ffffff"),
            (Model, "#000000", "#ffffff"),
            (Session, "#000000", "#00ffff"),
            (Block, "#000000", "#5c5cff"),
            (Today, "#000000", "#00ff00"),
            (Tmux, "#00cd00", "#000000"),
            (Context, "#0000ee", "#ffffff"),
            (Metrics, "#7f7f7f", "#e5e5e5"),
            (Version, "#000000", "#cd00cd"),
        ],
        Some(("#ff0000", "#ffffff")),
    )
}

fn dark_ansi256_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#af5f00", "#ffffff"),
            (Git, "#444444", "#ffffff"),
            (Model, "#303030", "#ffffff"),
            (Session, "#262626", "#00ffff"),
            (Block, "#303030", "#87d7ff"),
            (Today, "#1c1c1c", "#87ff87"),
            (Tmux, "#305f30", "#87d787"),
            (Context, "#4e4e4e", "#d0d0d0"),
            (Metrics, "#3a3a3a", "#d0d0d0"),
            (Version, "#3a3a3a", "#afafd7"),
        ],
        Some(("#af0000", "#ffffff")),
    )
}

fn light_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#ff6b47", "#ffffff"),
            (Git, "#4fb3d9", "#ffffff"),
            (Model, "#87ceeb", "#000000"),
            (Session, "#da70d6", "#ffffff"),
            (Block, "#6366f1", "#ffffff"),
            (Today, "#10b981", "#ffffff"),
            (Tmux, "#32cd32", "#ffffff"),
            (Context, "#718096", "#ffffff"),
            (Metrics, "#6b7280", "#ffffff"),
            (Version, "#8b7dd8", "#ffffff"),
        ],
        None,
    )
}

fn light_ansi_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#ff0000", "#ffffff"),
            (Git, "#00cdcd", "#000000"),
            (Model, "#00ffff", "#000000"),
            (Session, "#ff00ff", "#ffffff"),
            (Block, "#0000ee", "#ffffff"),
            (Today, "#00cd00", "#ffffff"),
            (Tmux, "#00ff00", "#000000"),
            (Context, "#7f7f7f", "#ffffff"),
            (Metrics, "#7f7f7f", "#ffffff"),
            (Version, "#cd00cd", "#ffffff"),
        ],
        None,
    )
}

fn nord_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#434c5e", "#d8dee9"),
            (Git, "#3b4252", "#a3be8c"),
            (Model, "#4c566a", "#81a1c1"),
            (Session, "#2e3440", "#88c0d0"),
            (Block, "#3b4252", "#81a1c1"),
            (Today, "#2e3440", "#8fbcbb"),
            (Tmux, "#2e3440", "#8fbcbb"),
            (Context, "#5e81ac", "#eceff4"),
            (Metrics, "#b48ead", "#2e3440"),
            (Version, "#434c5e", "#88c0d0"),
        ],
        Some(("#bf616a", "#eceff4")),
    )
}

fn tokyo_night_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#2f334d", "#82aaff"),
            (Git, "#1e2030", "#c3e88d"),
            (Model, "#191b29", "#fca7ea"),
            (Session, "#222436", "#86e1fc"),
            (Block, "#2d3748", "#7aa2f7"),
            (Today, "#1a202c", "#4fd6be"),
            (Tmux, "#191b29", "#4fd6be"),
            (Context, "#414868", "#c0caf5"),
            (Metrics, "#3d59a1", "#c0caf5"),
            (Version, "#292e42", "#bb9af7"),
        ],
        Some(("#f7768e", "#1a1b26")),
    )
}

fn rose_pine_theme() -> Theme {
    Theme::from_table(
        &[
            (Directory, "#26233a", "#c4a7e7"),
            (Git, "#1f1d2e", "#9ccfd8"),
            (Model, "#191724", "#ebbcba"),
            (Session, "#26233a", "#f6c177"),
            (Block, "#2a273f", "#eb6f92"),
            (Today, "#232136", "#9ccfd8"),
            (Tmux, "#26233a", "#908caa"),
            (Context, "#393552", "#e0def4"),
            (Metrics, "#524f67", "#e0def4"),
            (Version, "#2a2837", "#c4a7e7"),
        ],
        Some(("#eb6f92", "#191724")),
    )
}
