use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

use crate::segments::ModelInfo;

/// Session description the host pipes to the status line on stdin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookData {
    pub hook_event_name: Option<String>,
    pub session_id: Option<String>,
    pub transcript_path: Option<PathBuf>,
    pub cwd: Option<PathBuf>,
    pub model: Option<HookModel>,
    pub workspace: Option<WorkspaceInfo>,
    pub version: Option<String>,
    pub cost: Option<CostInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookModel {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceInfo {
    pub current_dir: Option<PathBuf>,
    pub project_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInfo {
    pub total_cost_usd: Option<f64>,
    pub total_duration_ms: Option<u64>,
    pub total_api_duration_ms: Option<u64>,
    pub total_lines_added: Option<u64>,
    pub total_lines_removed: Option<u64>,
}

impl HookData {
    pub fn parse(input: &str) -> serde_json::Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(input)
    }

    /// Reads stdin unless it is a terminal, where nothing will arrive.
    pub fn from_stdin() -> anyhow::Result<Self> {
        if atty::is(atty::Stream::Stdin) {
            return Ok(Self::default());
        }
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(Self::parse(&input)?)
    }

    pub fn current_dir(&self) -> Option<PathBuf> {
        self.workspace
            .as_ref()
            .and_then(|w| w.current_dir.clone())
            .or_else(|| self.cwd.clone())
    }

    pub fn project_dir(&self) -> Option<PathBuf> {
        self.workspace.as_ref().and_then(|w| w.project_dir.clone())
    }

    pub fn model_info(&self) -> Option<ModelInfo> {
        self.model.as_ref().map(|m| ModelInfo {
            id: m.id.clone(),
            display_name: m.display_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let hook = HookData::parse(
            r#"{
                "hook_event_name": "Status",
                "session_id": "abc",
                "transcript_path": "/tmp/abc.jsonl",
                "cwd": "/work/api",
                "model": {"id": "claude-opus-4-1", "display_name": "Opus"},
                "workspace": {"current_dir": "/work/api/src", "project_dir": "/work/api"},
                "version": "1.0.80",
                "cost": {"total_cost_usd": 0.42, "total_lines_added": 10}
            }"#,
        )
        .unwrap();

        assert_eq!(hook.current_dir(), Some(PathBuf::from("/work/api/src")));
        assert_eq!(hook.project_dir(), Some(PathBuf::from("/work/api")));
        assert_eq!(hook.model_info().and_then(|m| m.display_name).as_deref(), Some("Opus"));
        assert_eq!(hook.cost.and_then(|c| c.total_lines_added), Some(10));
    }

    #[test]
    fn test_sparse_payloads() {
        let hook = HookData::parse(r#"{"cwd": "/tmp"}"#).unwrap();
        assert_eq!(hook.current_dir(), Some(PathBuf::from("/tmp")));
        assert!(hook.model_info().is_none());
        assert!(HookData::parse("").unwrap().session_id.is_none());
        assert!(HookData::parse("{not json").is_err());
    }
}
