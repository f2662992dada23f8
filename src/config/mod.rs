pub mod defaults;
pub mod loader;

pub use defaults::*;
pub use loader::*;

use crate::segments::SegmentKind;
use crate::themes::ColorLevel;
use crate::utils::debug_with_context;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub display: DisplayConfig,
    /// Color table for the `custom` theme, keyed by segment name plus `warning`.
    pub colors: Option<HashMap<String, ThemeColors>>,
    pub budget: Option<BudgetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    #[serde(deserialize_with = "lenient")]
    pub style: DisplayStyle,
    #[serde(deserialize_with = "lenient")]
    pub charset: Charset,
    #[serde(deserialize_with = "lenient")]
    pub color_compatibility: ColorCompatibility,
    pub auto_wrap: bool,
    pub lines: Vec<LineConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub segments: LineSegments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    Powerline,
    Capsule,
    #[default]
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    #[default]
    Unicode,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCompatibility {
    #[default]
    Auto,
    None,
    Ansi,
    Ansi256,
    #[serde(rename = "truecolor")]
    TrueColor,
}

impl ColorCompatibility {
    /// `auto` defers to whatever the terminal reported.
    pub fn level(self, detected: ColorLevel) -> ColorLevel {
        match self {
            ColorCompatibility::Auto => detected,
            ColorCompatibility::None => ColorLevel::None,
            ColorCompatibility::Ansi => ColorLevel::Ansi,
            ColorCompatibility::Ansi256 => ColorLevel::Ansi256,
            ColorCompatibility::TrueColor => ColorLevel::TrueColor,
        }
    }
}

/// Segment settings for one configured line, in left-to-right order.
#[derive(Debug, Clone, Default)]
pub struct LineSegments(pub Vec<SegmentSettings>);

impl LineSegments {
    pub fn iter(&self) -> impl Iterator<Item = &SegmentSettings> {
        self.0.iter()
    }

    pub fn get(&self, kind: SegmentKind) -> Option<&SegmentSettings> {
        self.0.iter().find(|s| s.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: SegmentKind) -> Option<&mut SegmentSettings> {
        self.0.iter_mut().find(|s| s.kind() == kind)
    }
}

#[derive(Debug, Clone)]
pub enum SegmentSettings {
    Directory(DirectoryConfig),
    Git(GitConfig),
    Model(ModelConfig),
    Session(SessionConfig),
    Tmux(TmuxConfig),
    Context(ContextConfig),
    Metrics(MetricsConfig),
    Block(BlockConfig),
    Today(TodayConfig),
    Version(VersionConfig),
}

impl SegmentSettings {
    pub fn kind(&self) -> SegmentKind {
        match self {
            SegmentSettings::Directory(_) => SegmentKind::Directory,
            SegmentSettings::Git(_) => SegmentKind::Git,
            SegmentSettings::Model(_) => SegmentKind::Model,
            SegmentSettings::Session(_) => SegmentKind::Session,
            SegmentSettings::Tmux(_) => SegmentKind::Tmux,
            SegmentSettings::Context(_) => SegmentKind::Context,
            SegmentSettings::Metrics(_) => SegmentKind::Metrics,
            SegmentSettings::Block(_) => SegmentKind::Block,
            SegmentSettings::Today(_) => SegmentKind::Today,
            SegmentSettings::Version(_) => SegmentKind::Version,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            SegmentSettings::Directory(c) => c.enabled,
            SegmentSettings::Git(c) => c.enabled,
            SegmentSettings::Model(c) => c.enabled,
            SegmentSettings::Session(c) => c.enabled,
            SegmentSettings::Tmux(c) => c.enabled,
            SegmentSettings::Context(c) => c.enabled,
            SegmentSettings::Metrics(c) => c.enabled,
            SegmentSettings::Block(c) => c.enabled,
            SegmentSettings::Today(c) => c.enabled,
            SegmentSettings::Version(c) => c.enabled,
        }
    }
}

struct LineSegmentsVisitor;

impl<'de> Visitor<'de> for LineSegmentsVisitor {
    type Value = LineSegments;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of segment name to segment settings")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut segments: Vec<SegmentSettings> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            let Ok(kind) = key.parse::<SegmentKind>() else {
                debug_with_context("config", &format!("Ignoring unknown segment '{}'", key));
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            let settings = match kind {
                SegmentKind::Directory => SegmentSettings::Directory(map.next_value()?),
                SegmentKind::Git => SegmentSettings::Git(map.next_value()?),
                SegmentKind::Model => SegmentSettings::Model(map.next_value()?),
                SegmentKind::Session => SegmentSettings::Session(map.next_value()?),
                SegmentKind::Tmux => SegmentSettings::Tmux(map.next_value()?),
                SegmentKind::Context => SegmentSettings::Context(map.next_value()?),
                SegmentKind::Metrics => SegmentSettings::Metrics(map.next_value()?),
                SegmentKind::Block => SegmentSettings::Block(map.next_value()?),
                SegmentKind::Today => SegmentSettings::Today(map.next_value()?),
                SegmentKind::Version => SegmentSettings::Version(map.next_value()?),
            };

            // A repeated key replaces the earlier entry but keeps its position.
            match segments.iter_mut().find(|s| s.kind() == kind) {
                Some(existing) => *existing = settings,
                None => segments.push(settings),
            }
        }

        Ok(LineSegments(segments))
    }
}

impl<'de> Deserialize<'de> for LineSegments {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(LineSegmentsVisitor)
    }
}

impl Serialize for LineSegments {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for settings in &self.0 {
            let key = settings.kind().as_str();
            match settings {
                SegmentSettings::Directory(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Git(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Model(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Session(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Tmux(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Context(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Metrics(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Block(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Today(c) => map.serialize_entry(key, c)?,
                SegmentSettings::Version(c) => map.serialize_entry(key, c)?,
            }
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectoryConfig {
    pub enabled: bool,
    #[serde(deserialize_with = "lenient")]
    pub style: DirectoryStyle,
    /// Older configs spell `style: "basename"` this way.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_basename: Option<bool>,
}

impl DirectoryConfig {
    pub fn effective_style(&self) -> DirectoryStyle {
        if self.show_basename == Some(true) {
            DirectoryStyle::Basename
        } else {
            self.style
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryStyle {
    #[default]
    Full,
    Fish,
    Basename,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitConfig {
    pub enabled: bool,
    pub show_sha: bool,
    pub show_ahead_behind: bool,
    pub show_working_tree: bool,
    pub show_operation: bool,
    pub show_tag: bool,
    pub show_time_since_commit: bool,
    pub show_stash_count: bool,
    pub show_upstream: bool,
    pub show_repo_name: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageDisplay {
    Cost,
    Tokens,
    Both,
    Breakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub enabled: bool,
    #[serde(rename = "type", deserialize_with = "lenient_or_none")]
    pub display_type: Option<UsageDisplay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TodayConfig {
    pub enabled: bool,
    #[serde(rename = "type", deserialize_with = "lenient_or_none")]
    pub display_type: Option<UsageDisplay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockDisplay {
    #[default]
    Cost,
    Tokens,
    Both,
    Weighted,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnType {
    #[default]
    None,
    Cost,
    Tokens,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockConfig {
    pub enabled: bool,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub display_type: BlockDisplay,
    #[serde(deserialize_with = "lenient")]
    pub burn_type: BurnType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextLimits {
    pub sonnet: Option<u64>,
    pub opus: Option<u64>,
    pub default: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextConfig {
    pub enabled: bool,
    pub show_percentage_only: bool,
    pub warning_threshold: f64,
    pub model_context_limits: ContextLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricsConfig {
    pub enabled: bool,
    pub show_response_time: bool,
    pub show_last_response_time: bool,
    pub show_duration: bool,
    pub show_message_count: bool,
    pub show_lines_added: bool,
    pub show_lines_removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmuxConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub session: Option<BudgetAmount>,
    pub today: Option<BudgetAmount>,
    pub block: Option<BudgetAmount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    Cost,
    Tokens,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAmount {
    pub amount: f64,
    #[serde(rename = "type", default, deserialize_with = "lenient_or_none")]
    pub budget_type: Option<BudgetKind>,
    #[serde(default)]
    pub warning_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option value '{}'", self.0)
    }
}

macro_rules! parse_options {
    ($ty:ty { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(UnknownOption(other.to_string())),
                }
            }
        }
    };
}

parse_options!(DisplayStyle {
    "powerline" => DisplayStyle::Powerline,
    "capsule" => DisplayStyle::Capsule,
    "minimal" => DisplayStyle::Minimal,
});
parse_options!(Charset { "unicode" => Charset::Unicode, "text" => Charset::Text });
parse_options!(ColorCompatibility {
    "auto" => ColorCompatibility::Auto,
    "none" => ColorCompatibility::None,
    "ansi" => ColorCompatibility::Ansi,
    "ansi256" => ColorCompatibility::Ansi256,
    "truecolor" => ColorCompatibility::TrueColor,
});
parse_options!(DirectoryStyle {
    "full" => DirectoryStyle::Full,
    "fish" => DirectoryStyle::Fish,
    "basename" => DirectoryStyle::Basename,
});
parse_options!(UsageDisplay {
    "cost" => UsageDisplay::Cost,
    "tokens" => UsageDisplay::Tokens,
    "both" => UsageDisplay::Both,
    "breakdown" => UsageDisplay::Breakdown,
});
parse_options!(BlockDisplay {
    "cost" => BlockDisplay::Cost,
    "tokens" => BlockDisplay::Tokens,
    "both" => BlockDisplay::Both,
    "weighted" => BlockDisplay::Weighted,
    "time" => BlockDisplay::Time,
});
parse_options!(BurnType {
    "none" => BurnType::None,
    "cost" => BurnType::Cost,
    "tokens" => BurnType::Tokens,
    "both" => BurnType::Both,
});
parse_options!(BudgetKind { "cost" => BudgetKind::Cost, "tokens" => BudgetKind::Tokens });

/// Unrecognized enum values fall back to the field's default instead of
/// rejecting the whole config file.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    Ok(lenient_or_none(deserializer)?.unwrap_or_default())
}

fn lenient_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(s.parse().ok()),
        Some(other) => {
            debug_with_context("config", &format!("Ignoring non-string option {}", other));
            Ok(None)
        }
    }
}
