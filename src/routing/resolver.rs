//! Route resolution module
//!
//! Path parameters are validated against the preset store here, so anything
//! that reaches the responder is known to have an asset.

use crate::preset::{LookupKind, PresetError, PresetStore, VersionLabel};

const INSTALL_SCRIPT: &str = "install.sh";

/// A resolved preset route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/install.sh`
    DefaultInstall,
    /// `/{version}/install.sh`
    VersionInstall(VersionLabel),
    /// `/version/{version}`
    Dedicated(VersionLabel),
    /// `/presets/{preset}`
    Named(String),
}

/// Resolve a request path against the supported versions and presets
///
/// Unknown paths and unsupported parameters both come back as
/// `PresetError::NotFound`.
pub fn resolve(path: &str, store: &PresetStore) -> Result<Route, PresetError> {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let segments: Vec<&str> = relative.split('/').collect();

    match segments.as_slice() {
        [INSTALL_SCRIPT] | [INSTALL_SCRIPT, ""] => Ok(Route::DefaultInstall),
        [version, INSTALL_SCRIPT] => store
            .parse_install_version(version)
            .map(Route::VersionInstall),
        ["version", version] | ["version", version, ""] => store
            .parse_dedicated_version(version)
            .map(Route::Dedicated),
        ["presets", name] => store.named(name).map(|preset| Route::Named(preset.name().to_string())),
        _ => Err(PresetError::not_found(LookupKind::Route, path)),
    }
}
