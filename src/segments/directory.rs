use crate::config::{DirectoryConfig, DirectoryStyle};
use crate::segments::{Segment, SegmentContext, SegmentData, SegmentKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct DirectoryInfo {
    pub current_dir: PathBuf,
    pub project_dir: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
}

impl Segment for DirectoryConfig {
    fn render(&self, ctx: &SegmentContext) -> Option<SegmentData> {
        let text = display_directory(&ctx.facts.directory, self.effective_style());
        Some(ctx.segment(SegmentKind::Directory, text))
    }
}

pub fn display_directory(info: &DirectoryInfo, style: DirectoryStyle) -> String {
    match style {
        DirectoryStyle::Basename => basename(&info.current_dir),
        DirectoryStyle::Full => full_directory(info),
        DirectoryStyle::Fish => abbreviate_fish(&full_directory(info)),
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "root".to_string())
}

/// Home-substituted path made relative to the project root when the current
/// directory lies inside it; anywhere else only the basename is shown.
fn full_directory(info: &DirectoryInfo) -> String {
    let current = tilde_path(&info.current_dir, info.home_dir.as_deref());

    let Some(project) = &info.project_dir else {
        return basename(&info.current_dir);
    };
    let project = tilde_path(project, info.home_dir.as_deref());

    if current == project {
        return basename(&project);
    }
    match current.strip_prefix(&project) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => basename(&current),
    }
}

fn tilde_path(path: &Path, home: Option<&Path>) -> PathBuf {
    match home.map(|home| path.strip_prefix(home)) {
        Some(Ok(rest)) => Path::new("~").join(rest),
        _ => path.to_path_buf(),
    }
}

/// Shorten every component but the last to its first character.
/// `~` and empty components are kept, so applying this twice is a no-op.
pub fn abbreviate_fish(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    let last = parts.len().saturating_sub(1);

    parts
        .iter()
        .enumerate()
        .map(|(idx, part)| {
            if idx == last || part.is_empty() || *part == "~" {
                part.to_string()
            } else {
                part.chars().next().map(String::from).unwrap_or_default()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
