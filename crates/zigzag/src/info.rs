use std::path::Path;
use tracing::warn;

pub const DEFAULT_TITLE: &str = "Title";
pub const DEFAULT_DESCRIPTION: &str = "description";

/// Page heading shown above the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineInfo {
    pub title: String,
    pub description: String,
}

impl Default for TimelineInfo {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl TimelineInfo {
    /// Read the title and description files as written. Missing or empty files fall back
    /// to the defaults, they never stop the timeline from loading.
    pub fn load(title_path: &Path, description_path: &Path) -> Self {
        Self {
            title: read_or(title_path, DEFAULT_TITLE),
            description: read_or(description_path, DEFAULT_DESCRIPTION),
        }
    }
}

fn read_or(path: &Path, default: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) if contents.is_empty() => default.to_string(),
        Ok(contents) => contents,
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            default.to_string()
        }
    }
}
