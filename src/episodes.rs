// Episode discovery: finds `episode_<id>.srt` files and fixes their order.
//
// Episode order matters for evolution series, so it must come from the file
// names, never from directory listing order. Numeric ids sort numerically
// (episode_2 before episode_10); anything else sorts as text after them.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::debug;

static EPISODE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^episode_(.+)\.srt$").expect("valid episode pattern"));

/// A subtitle file and the episode id taken from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeFile {
    pub id: String,
    pub path: PathBuf,
}

impl EpisodeFile {
    /// Build from a path if its file name follows the episode convention.
    pub fn from_path(path: &Path) -> Option<Self> {
        let id = episode_id(path.file_name()?.to_str()?)?;
        Some(Self {
            id,
            path: path.to_path_buf(),
        })
    }
}

/// Extract the episode id from a file name like `episode_03.srt`.
pub fn episode_id(file_name: &str) -> Option<String> {
    EPISODE_FILE
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Every episode file directly inside `dir`, in canonical episode order.
///
/// Other files are ignored. An empty result is not an error here; the
/// season runner decides what an empty season means.
pub fn discover(dir: &Path) -> Result<Vec<EpisodeFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read episode directory {}", dir.display()))?;

    let mut episodes = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        match EpisodeFile::from_path(&path) {
            Some(episode) => episodes.push(episode),
            None => debug!(path = %path.display(), "Ignoring non-episode file"),
        }
    }

    sort_episodes(&mut episodes);
    Ok(episodes)
}

/// Numeric ids first in numeric order, then the rest lexicographically.
pub fn sort_episodes(episodes: &mut [EpisodeFile]) {
    episodes.sort_by(|a, b| compare_ids(&a.id, &b.id));
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_id() {
        assert_eq!(episode_id("episode_03.srt"), Some("03".to_string()));
        assert_eq!(episode_id("Episode_s01e02.SRT"), Some("s01e02".to_string()));
        assert_eq!(episode_id("notes.txt"), None);
        assert_eq!(episode_id("episode_.srt"), None);
    }

    #[test]
    fn test_numeric_ids_sort_numerically() {
        let mut episodes: Vec<EpisodeFile> = ["10", "2", "pilot", "01"]
            .iter()
            .map(|id| EpisodeFile {
                id: id.to_string(),
                path: PathBuf::from(format!("episode_{id}.srt")),
            })
            .collect();
        sort_episodes(&mut episodes);
        let ids: Vec<&str> = episodes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["01", "2", "10", "pilot"]);
    }
}
