use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_GRAPH_NODE_LIMIT: usize = 50;

/// The subset of `settings.json` the backend acts on. The frontend owns the
/// rest of the file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BackendSettings {
    pub graph_node_limit: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            graph_node_limit: DEFAULT_GRAPH_NODE_LIMIT,
        }
    }
}

/// Raw `settings.json`, or `{}` when it cannot be read.
pub fn read_settings_raw(vault_path: &Path) -> String {
    fs::read_to_string(vault_path.join("settings.json")).unwrap_or_else(|_| "{}".to_string())
}

pub fn load_backend_settings(vault_path: &Path) -> BackendSettings {
    let raw = read_settings_raw(vault_path);
    match serde_json::from_str(&raw) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("settings.json ignored: {err}");
            BackendSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty_object() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(read_settings_raw(dir.path()), "{}");
        assert_eq!(load_backend_settings(dir.path()), BackendSettings::default());
    }

    #[test]
    fn reads_node_limit_and_ignores_other_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            r##"{"accent_color": "#fff", "graph_node_limit": 7}"##,
        )
        .unwrap();
        assert_eq!(load_backend_settings(dir.path()).graph_node_limit, 7);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("settings.json"), "{oops").unwrap();
        assert_eq!(
            load_backend_settings(dir.path()).graph_node_limit,
            DEFAULT_GRAPH_NODE_LIMIT
        );
    }
}
