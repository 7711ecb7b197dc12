//! Preset store
//!
//! Every asset the configuration asks for is resolved once at startup, so a
//! request can only ever miss on an unsupported parameter, never on a missing
//! file.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use super::bundled;
use super::error::{LookupKind, PresetError};
use super::version::VersionLabel;
use crate::config::PresetsConfig;

/// Asset holding the shared install template
const TEMPLATE_ASSET: &str = "php";

fn dedicated_asset(version: &str) -> String {
    format!("php{version}")
}

/// An immutable install script
#[derive(Debug, Clone)]
pub struct Preset {
    name: String,
    content: Cow<'static, str>,
}

impl Preset {
    /// Asset name, e.g. `php8.2`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug)]
pub struct PresetStore {
    default_token: String,
    template: Preset,
    install_versions: Vec<String>,
    dedicated: HashMap<String, Preset>,
    named: HashMap<String, Preset>,
}

impl PresetStore {
    /// Build the store from the scripts compiled into the binary
    pub fn bundled(config: &PresetsConfig) -> Result<Self, PresetError> {
        Self::assemble(config, |name| bundled::lookup(name).map(Cow::Borrowed))
    }

    /// Build the store, reading `<directory>/<asset>.sh` when a preset
    /// directory is configured and falling back to the bundled scripts otherwise
    pub async fn load(config: &PresetsConfig) -> Result<Self, PresetError> {
        let Some(dir) = config.directory.as_deref() else {
            return Self::bundled(config);
        };

        let mut loaded = HashMap::new();
        for name in required_assets(config) {
            let path = Path::new(dir).join(format!("{name}.sh"));
            let content =
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| PresetError::Io {
                        path: path.display().to_string(),
                        source,
                    })?;
            loaded.insert(name, content);
        }

        Self::assemble(config, |name| loaded.get(name).cloned().map(Cow::Owned))
    }

    fn assemble<F>(config: &PresetsConfig, mut fetch: F) -> Result<Self, PresetError>
    where
        F: FnMut(&str) -> Option<Cow<'static, str>>,
    {
        let mut take = |name: &str| {
            fetch(name)
                .map(|content| Preset {
                    name: name.to_string(),
                    content,
                })
                .ok_or_else(|| PresetError::MissingAsset {
                    name: name.to_string(),
                })
        };

        let template = take(TEMPLATE_ASSET)?;

        let mut dedicated = HashMap::new();
        for version in &config.dedicated_versions {
            dedicated.insert(version.clone(), take(dedicated_asset(version).as_str())?);
        }

        let mut named = HashMap::new();
        for name in &config.named {
            named.insert(name.clone(), take(name.as_str())?);
        }

        Ok(Self {
            default_token: config.default_version.clone(),
            template,
            install_versions: config.install_versions.clone(),
            dedicated,
            named,
        })
    }

    /// The literal substring of the template replaced on versioned installs
    pub fn default_token(&self) -> &str {
        &self.default_token
    }

    pub const fn default_template(&self) -> &Preset {
        &self.template
    }

    pub fn install_versions(&self) -> &[String] {
        &self.install_versions
    }

    pub fn dedicated_versions(&self) -> impl Iterator<Item = &str> {
        self.dedicated.keys().map(String::as_str)
    }

    pub fn named_presets(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    /// Accept `raw` if `/{raw}/install.sh` is supported
    pub fn parse_install_version(&self, raw: &str) -> Result<VersionLabel, PresetError> {
        if self.install_versions.iter().any(|v| v == raw) {
            Ok(VersionLabel::new(raw))
        } else {
            Err(PresetError::not_found(LookupKind::InstallVersion, raw))
        }
    }

    /// Accept `raw` if it has a dedicated script
    pub fn parse_dedicated_version(&self, raw: &str) -> Result<VersionLabel, PresetError> {
        if self.dedicated.contains_key(raw) {
            Ok(VersionLabel::new(raw))
        } else {
            Err(PresetError::not_found(LookupKind::DedicatedVersion, raw))
        }
    }

    pub fn dedicated(&self, version: &VersionLabel) -> Result<&Preset, PresetError> {
        self.dedicated
            .get(version.as_str())
            .ok_or_else(|| PresetError::not_found(LookupKind::DedicatedVersion, version.as_str()))
    }

    pub fn named(&self, name: &str) -> Result<&Preset, PresetError> {
        self.named
            .get(name)
            .ok_or_else(|| PresetError::not_found(LookupKind::NamedPreset, name))
    }
}

/// Asset names the configuration requires, template first
fn required_assets(config: &PresetsConfig) -> Vec<String> {
    let mut assets = vec![TEMPLATE_ASSET.to_string()];
    assets.extend(config.dedicated_versions.iter().map(|v| dedicated_asset(v)));
    assets.extend(config.named.iter().cloned());
    assets
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("preset-store-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_bundled_store_matches_assets() {
        let store = PresetStore::bundled(&PresetsConfig::default()).unwrap();
        assert_eq!(store.default_token(), "8.4");
        assert_eq!(store.default_template().name(), "php");
        assert_eq!(store.default_template().content(), bundled::lookup("php").unwrap());

        for version in ["7.4", "8.1", "8.2", "8.3"] {
            let label = store.parse_dedicated_version(version).unwrap();
            let preset = store.dedicated(&label).unwrap();
            assert_eq!(preset.name(), format!("php{version}"));
            assert_eq!(preset.content(), bundled::lookup(&format!("php{version}")).unwrap());
        }

        assert_eq!(
            store.named("laravel").unwrap().content(),
            bundled::lookup("laravel").unwrap()
        );
    }

    #[test]
    fn test_install_versions_include_default() {
        let store = PresetStore::bundled(&PresetsConfig::default()).unwrap();
        for version in ["7.4", "8.1", "8.2", "8.3", "8.4"] {
            assert_eq!(store.parse_install_version(version).unwrap().as_str(), version);
        }
    }

    #[test]
    fn test_unsupported_lookups_are_not_found() {
        let store = PresetStore::bundled(&PresetsConfig::default()).unwrap();

        let err = store.parse_install_version("5.6").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "unsupported install version: 5.6");

        // 8.4 installs from the template but has no dedicated script
        assert!(store.parse_dedicated_version("8.4").unwrap_err().is_not_found());
        assert!(store.named("symfony").unwrap_err().is_not_found());
        assert!(store.parse_install_version("").is_err());
    }

    #[test]
    fn test_missing_bundled_asset_fails_startup() {
        let config = PresetsConfig {
            dedicated_versions: vec!["8.3".to_string(), "9.0".to_string()],
            ..PresetsConfig::default()
        };
        let err = PresetStore::bundled(&config).unwrap_err();
        assert!(matches!(err, PresetError::MissingAsset { ref name } if name == "php9.0"));
    }

    #[tokio::test]
    async fn test_load_without_directory_uses_bundled() {
        let store = PresetStore::load(&PresetsConfig::default()).await.unwrap();
        assert_eq!(store.default_template().content(), bundled::lookup("php").unwrap());
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = scratch_dir("load");
        std::fs::write(dir.join("php.sh"), "echo php8.4 for $OS\n").unwrap();
        std::fs::write(dir.join("php8.3.sh"), "echo php8.3\n").unwrap();
        std::fs::write(dir.join("laravel.sh"), "echo laravel\n").unwrap();

        let config = PresetsConfig {
            dedicated_versions: vec!["8.3".to_string()],
            directory: Some(dir.display().to_string()),
            ..PresetsConfig::default()
        };
        let store = PresetStore::load(&config).await.unwrap();

        assert_eq!(store.default_template().content(), "echo php8.4 for $OS\n");
        let label = store.parse_dedicated_version("8.3").unwrap();
        assert_eq!(store.dedicated(&label).unwrap().content(), "echo php8.3\n");
        assert_eq!(store.named("laravel").unwrap().content(), "echo laravel\n");
        assert!(store.parse_dedicated_version("8.2").is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_load_from_directory_missing_file() {
        let dir = scratch_dir("missing");
        std::fs::write(dir.join("php.sh"), "echo php\n").unwrap();

        let config = PresetsConfig {
            dedicated_versions: vec![],
            named: vec!["laravel".to_string()],
            directory: Some(dir.display().to_string()),
            ..PresetsConfig::default()
        };
        let err = PresetStore::load(&config).await.unwrap_err();
        match err {
            PresetError::Io { path, .. } => assert!(path.ends_with("laravel.sh")),
            other => panic!("expected Io error, got {other:?}"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
