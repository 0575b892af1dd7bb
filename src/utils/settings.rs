//! Connection settings for the GlitchTip project being mirrored.
//!
//! Settings come from an optional editor `settings.json` and are then
//! overridden by CLI flags or environment variables. A sync can only run
//! once every value is present.

use super::config::{SETTINGS_KEY_ORG, SETTINGS_KEY_PROJECT, SETTINGS_KEY_TOKEN, SETTINGS_KEY_URL};
use super::error::SettingsError;
use log::debug;
use std::path::Path;

/// Possibly incomplete connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub url: Option<String>,
    pub auth_token: Option<String>,
    pub organization_slug: Option<String>,
    pub project_slug: Option<String>,
}

/// Complete settings, ready for the API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub base_url: String,
    pub auth_token: String,
    pub organization_slug: String,
    pub project_slug: String,
}

impl Settings {
    /// Load the `glitchtip.*` keys from an editor settings file
    ///
    /// **Public** - other keys in the file are ignored
    ///
    /// # Errors
    /// * `SettingsError::Io` - file cannot be read
    /// * `SettingsError::Json` - file is not a JSON object
    pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        debug!("Reading settings from: {}", path.display());

        let text = std::fs::read_to_string(path)?;
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;

        let read = |key: &str| object.get(key).and_then(|v| v.as_str()).map(str::to_string);

        Ok(Self {
            url: read(SETTINGS_KEY_URL),
            auth_token: read(SETTINGS_KEY_TOKEN),
            organization_slug: read(SETTINGS_KEY_ORG),
            project_slug: read(SETTINGS_KEY_PROJECT),
        })
    }

    /// Overlay `other` on top of `self`; values present in `other` win
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            url: present(other.url).or(present(self.url)),
            auth_token: present(other.auth_token).or(present(self.auth_token)),
            organization_slug: present(other.organization_slug).or(present(self.organization_slug)),
            project_slug: present(other.project_slug).or(present(self.project_slug)),
        }
    }

    /// Resolve into a complete target
    ///
    /// **Public** - an incomplete config means "sync not runnable"
    ///
    /// # Errors
    /// * `SettingsError::Incomplete` - lists every missing key
    pub fn target(&self) -> Result<SyncTarget, SettingsError> {
        let mut missing = Vec::new();

        let mut take = |value: &Option<String>, key: &'static str| match present(value.clone()) {
            Some(v) => v,
            None => {
                missing.push(key);
                String::new()
            }
        };

        let base_url = take(&self.url, SETTINGS_KEY_URL);
        let auth_token = take(&self.auth_token, SETTINGS_KEY_TOKEN);
        let organization_slug = take(&self.organization_slug, SETTINGS_KEY_ORG);
        let project_slug = take(&self.project_slug, SETTINGS_KEY_PROJECT);

        if !missing.is_empty() {
            return Err(SettingsError::Incomplete { missing });
        }

        Ok(SyncTarget {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            organization_slug,
            project_slug,
        })
    }
}

/// Treat empty or whitespace-only values as absent
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full() -> Settings {
        Settings {
            url: Some("https://app.glitchtip.com/".to_string()),
            auth_token: Some("token".to_string()),
            organization_slug: Some("acme".to_string()),
            project_slug: Some("web".to_string()),
        }
    }

    #[test]
    fn test_target_complete() {
        let target = full().target().unwrap();
        assert_eq!(target.base_url, "https://app.glitchtip.com");
        assert_eq!(target.project_slug, "web");
    }

    #[test]
    fn test_target_reports_missing_keys() {
        let settings = Settings {
            auth_token: Some("   ".to_string()),
            project_slug: None,
            ..full()
        };

        match settings.target() {
            Err(SettingsError::Incomplete { missing }) => {
                assert_eq!(missing, vec![SETTINGS_KEY_TOKEN, SETTINGS_KEY_PROJECT]);
            }
            other => panic!("expected incomplete settings, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_prefers_override() {
        let base = full();
        let overrides = Settings {
            project_slug: Some("api".to_string()),
            auth_token: Some(String::new()),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.project_slug.as_deref(), Some("api"));
        assert_eq!(merged.auth_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_from_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"editor.tabSize": 2, "glitchtip.url": "https://gt.example", "glitchtip.projectSlug": "web"}}"#
        )
        .unwrap();

        let settings = Settings::from_settings_file(file.path()).unwrap();
        assert_eq!(settings.url.as_deref(), Some("https://gt.example"));
        assert_eq!(settings.project_slug.as_deref(), Some("web"));
        assert_eq!(settings.auth_token, None);
    }

    #[test]
    fn test_from_settings_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            Settings::from_settings_file(file.path()),
            Err(SettingsError::Json(_))
        ));
    }
}
