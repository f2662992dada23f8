use crate::config::*;

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            display: DisplayConfig::default(),
            colors: None,
            budget: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style: DisplayStyle::Minimal,
            charset: Charset::Unicode,
            color_compatibility: ColorCompatibility::Auto,
            auto_wrap: true,
            lines: vec![LineConfig::default_line()],
        }
    }
}

impl LineConfig {
    pub fn default_line() -> Self {
        Self {
            segments: LineSegments(vec![
                SegmentSettings::Directory(DirectoryConfig::default()),
                SegmentSettings::Git(GitConfig::default()),
                SegmentSettings::Model(ModelConfig::default()),
                SegmentSettings::Session(SessionConfig::default()),
                SegmentSettings::Today(TodayConfig::default()),
                SegmentSettings::Context(ContextConfig::default()),
            ]),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            style: DirectoryStyle::Full,
            show_basename: None,
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_sha: true,
            show_ahead_behind: true,
            show_working_tree: false,
            show_operation: false,
            show_tag: false,
            show_time_since_commit: false,
            show_stash_count: false,
            show_upstream: false,
            show_repo_name: false,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_type: Some(UsageDisplay::Tokens),
        }
    }
}

impl Default for TodayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_type: Some(UsageDisplay::Cost),
        }
    }
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display_type: BlockDisplay::Cost,
            burn_type: BurnType::None,
        }
    }
}

pub const DEFAULT_CONTEXT_LIMIT: u64 = 200_000;
pub const DEFAULT_CONTEXT_WARNING: f64 = 100.0;

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_percentage_only: false,
            warning_threshold: DEFAULT_CONTEXT_WARNING,
            model_context_limits: ContextLimits::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_response_time: true,
            show_last_response_time: false,
            show_duration: true,
            show_message_count: true,
            show_lines_added: true,
            show_lines_removed: true,
        }
    }
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
