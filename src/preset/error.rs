use std::fmt;

use thiserror::Error;

/// What a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    InstallVersion,
    DedicatedVersion,
    NamedPreset,
    Route,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallVersion => write!(f, "install version"),
            Self::DedicatedVersion => write!(f, "dedicated version"),
            Self::NamedPreset => write!(f, "preset"),
            Self::Route => write!(f, "route"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PresetError {
    /// Unsupported version, preset or path; served as a plain 404
    #[error("unsupported {kind}: {name}")]
    NotFound { kind: LookupKind, name: String },

    #[error("no asset available for preset '{name}'")]
    MissingAsset { name: String },

    #[error("failed to read preset '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl PresetError {
    pub fn not_found(kind: LookupKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
