//! Routing module
//!
//! Maps request paths onto preset routes:
//! - `/install.sh` - default template
//! - `/{version}/install.sh` - template with the version rewritten
//! - `/version/{version}` - dedicated script
//! - `/presets/{preset}` - named preset

mod resolver;

pub use resolver::{resolve, Route};
