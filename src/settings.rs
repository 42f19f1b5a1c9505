use serde::{Deserialize, Serialize};

/// Vault-level preferences stored in `settings.json`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub font_size: u32,
    pub accent_color: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            accent_color: "#6366f1".to_string(),
        }
    }
}

impl AppSettings {
    /// Unknown or malformed content falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn css_variables(&self) -> String {
        format!(
            "--editor-font-size: {}px; --accent-color: {};",
            self.font_size, self.accent_color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = AppSettings::from_json(r#"{"font_size": 18}"#);
        assert_eq!(settings.font_size, 18);
        assert_eq!(settings.accent_color, "#6366f1");
    }

    #[test]
    fn backend_only_keys_are_ignored() {
        let settings = AppSettings::from_json(r#"{"graph_node_limit": 7, "font_size": 14}"#);
        assert_eq!(settings.font_size, 14);
    }

    #[test]
    fn garbage_falls_back() {
        assert_eq!(AppSettings::from_json("not json"), AppSettings::default());
    }

    #[test]
    fn renders_css_variables() {
        let settings = AppSettings::default();
        assert_eq!(
            settings.css_variables(),
            "--editor-font-size: 16px; --accent-color: #6366f1;"
        );
    }
}
