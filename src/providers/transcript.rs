use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::utils::{debug_with_context, warn};

pub const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// One JSONL transcript line. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub message: Option<MessageInfo>,
    #[serde(rename = "costUSD", default)]
    pub cost_usd: Option<f64>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub is_sidechain: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<UsageInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageInfo {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub cache_creation_input_tokens: Option<u64>,
    pub cache_read_input_tokens: Option<u64>,
}

impl UsageInfo {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.unwrap_or(0)
            + self.output_tokens.unwrap_or(0)
            + self.cache_creation_input_tokens.unwrap_or(0)
            + self.cache_read_input_tokens.unwrap_or(0)
    }

    /// Tokens occupying the context window on this turn.
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens.unwrap_or(0)
            + self.cache_creation_input_tokens.unwrap_or(0)
            + self.cache_read_input_tokens.unwrap_or(0)
    }
}

impl TranscriptEntry {
    pub fn usage(&self) -> Option<&UsageInfo> {
        self.message.as_ref()?.usage.as_ref()
    }

    pub fn model(&self) -> Option<&str> {
        self.message.as_ref()?.model.as_deref()
    }

    pub fn is_sidechain(&self) -> bool {
        self.is_sidechain.unwrap_or(false)
    }

    pub fn is_user(&self) -> bool {
        self.entry_type.as_deref() == Some("user")
            || self.message.as_ref().and_then(|m| m.role.as_deref()) == Some("user")
    }

    pub fn is_assistant(&self) -> bool {
        self.entry_type.as_deref() == Some("assistant")
            || self.message.as_ref().and_then(|m| m.role.as_deref()) == Some("assistant")
    }

    /// `messageId:requestId`, present only when both ids are known.
    pub fn unique_hash(&self) -> Option<String> {
        let message_id = self.message.as_ref()?.id.as_deref()?;
        let request_id = self.request_id.as_deref()?;
        Some(format!("{}:{}", message_id, request_id))
    }
}

/// Lines that fail to parse or lack a timestamp are skipped.
pub fn parse_jsonl_line(line: &str) -> Option<TranscriptEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    serde_json::from_str(line).ok()
}

pub fn parse_jsonl_content(content: &str) -> Vec<TranscriptEntry> {
    content.lines().filter_map(parse_jsonl_line).collect()
}

pub fn parse_transcript_file(path: &Path) -> Result<Vec<TranscriptEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open transcript: {}", path.display()))?;

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("Failed to read transcript: {}", path.display()))?;
        if let Some(entry) = parse_jsonl_line(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Read the session transcript named by the host.
pub async fn load_session_transcript(path: &Path) -> Result<Vec<TranscriptEntry>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    Ok(dedupe_and_sort(parse_jsonl_content(&content)))
}

/// Sort by time, then drop repeats of the same `messageId:requestId`.
/// Entries without both ids are always kept.
pub fn dedupe_and_sort(mut entries: Vec<TranscriptEntry>) -> Vec<TranscriptEntry> {
    entries.sort_by_key(|e| e.timestamp);

    let mut seen = HashSet::new();
    entries.retain(|entry| match entry.unique_hash() {
        Some(hash) => seen.insert(hash),
        None => true,
    });
    entries
}

/// Claude data directories: `CLAUDE_CONFIG_DIR` (comma separated) or the
/// platform defaults that exist.
pub fn claude_paths() -> Vec<PathBuf> {
    if let Ok(env_paths) = std::env::var(CLAUDE_CONFIG_DIR_ENV) {
        let paths: Vec<PathBuf> = env_paths
            .split(',')
            .map(|p| PathBuf::from(p.trim()))
            .filter(|p| p.exists())
            .collect();
        if !paths.is_empty() {
            return paths;
        }
    }

    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    [home.join(".config").join("claude"), home.join(".claude")]
        .into_iter()
        .filter(|p| p.exists())
        .collect()
}

/// Finds and parses every project transcript under the Claude data roots.
pub struct TranscriptScanner {
    roots: Vec<PathBuf>,
    since: Option<DateTime<Utc>>,
}

impl TranscriptScanner {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots, since: None }
    }

    /// Skip files last modified, and entries stamped, before `cutoff`.
    pub fn since(mut self, cutoff: DateTime<Utc>) -> Self {
        self.since = Some(cutoff);
        self
    }

    /// `<root>/projects/<project>/<session>.jsonl`
    pub fn discover_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for root in &self.roots {
            let projects_dir = root.join("projects");
            if !projects_dir.is_dir() {
                continue;
            }

            for entry in WalkDir::new(&projects_dir)
                .min_depth(2)
                .max_depth(2)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !entry.file_type().is_file()
                    || path.extension().and_then(|ext| ext.to_str()) != Some("jsonl")
                {
                    continue;
                }

                if let Some(cutoff) = self.since {
                    let modified = entry
                        .metadata()
                        .ok()
                        .and_then(|m| m.modified().ok())
                        .map(DateTime::<Utc>::from);
                    if modified.is_some_and(|m| m < cutoff) {
                        continue;
                    }
                }

                files.push(entry.into_path());
            }
        }

        files
    }

    /// Parses files in parallel; unreadable files are reported and skipped.
    pub fn load(&self) -> Vec<TranscriptEntry> {
        let files = self.discover_files();
        debug_with_context("transcript", &format!("Scanning {} transcript files", files.len()));

        let entries: Vec<TranscriptEntry> = files
            .par_iter()
            .flat_map(|path| match parse_transcript_file(path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn(&format!("{:#}", e));
                    Vec::new()
                }
            })
            .filter(|entry| self.since.map_or(true, |cutoff| entry.timestamp >= cutoff))
            .collect();

        dedupe_and_sort(entries)
    }
}
