//! Preset rendering module
//!
//! Turns a resolved route into script text. Versioned installs rewrite the
//! default version token in the shared template; every other route is served
//! verbatim.

use std::borrow::Cow;

use hyper::body::Bytes;

use crate::preset::{PresetError, PresetStore};
use crate::routing::Route;

/// Replace the first occurrence of `token` in `template` with `requested`
///
/// This is a literal substring replace, not a template language: if the token
/// first shows up somewhere unrelated, that occurrence is the one rewritten.
/// Templates without the token come back borrowed and unchanged.
pub fn substitute_version<'a>(template: &'a str, token: &str, requested: &str) -> Cow<'a, str> {
    if token.is_empty() || token == requested || !template.contains(token) {
        return Cow::Borrowed(template);
    }
    Cow::Owned(template.replacen(token, requested, 1))
}

/// Render the script body for a resolved route
pub fn render<'s>(route: &Route, store: &'s PresetStore) -> Result<Cow<'s, str>, PresetError> {
    match route {
        Route::DefaultInstall => Ok(Cow::Borrowed(store.default_template().content())),
        Route::VersionInstall(version) => Ok(substitute_version(
            store.default_template().content(),
            store.default_token(),
            version.as_str(),
        )),
        Route::Dedicated(version) => store
            .dedicated(version)
            .map(|preset| Cow::Borrowed(preset.content())),
        Route::Named(name) => store.named(name).map(|preset| Cow::Borrowed(preset.content())),
    }
}

/// Response body bytes for rendered script text
pub fn into_bytes(script: Cow<'_, str>) -> Bytes {
    match script {
        Cow::Borrowed(text) => Bytes::copy_from_slice(text.as_bytes()),
        Cow::Owned(text) => Bytes::from(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresetsConfig;

    #[test]
    fn test_substitute_version() {
        assert_eq!(
            substitute_version("php8.4 install for $OS", "8.4", "8.1"),
            "php8.1 install for $OS"
        );
    }

    #[test]
    fn test_substitute_first_occurrence_only() {
        let rendered = substitute_version("PHP_VERSION=8.4 # latest is 8.4", "8.4", "7.4");
        assert_eq!(rendered, "PHP_VERSION=7.4 # latest is 8.4");
    }

    #[test]
    fn test_substitute_is_literal() {
        // Not a version field, still the first occurrence
        let rendered = substitute_version("sha 18.4.2 then php8.4", "8.4", "8.2");
        assert_eq!(rendered, "sha 18.2.2 then php8.4");
    }

    #[test]
    fn test_substitute_without_token_borrows() {
        let template = "echo no version here";
        assert!(matches!(
            substitute_version(template, "8.4", "8.1"),
            Cow::Borrowed(t) if t == template
        ));
        assert!(matches!(
            substitute_version(template, "", "8.1"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_render_routes() {
        let store = PresetStore::bundled(&PresetsConfig::default()).unwrap();
        let template = store.default_template().content();

        assert_eq!(render(&Route::DefaultInstall, &store).unwrap(), template);

        let v81 = store.parse_install_version("8.1").unwrap();
        let rendered = render(&Route::VersionInstall(v81), &store).unwrap();
        assert_eq!(rendered, template.replacen("8.4", "8.1", 1));
        assert!(rendered.contains("PHP_VERSION=\"8.1\""));

        // Requesting the default version is the template itself
        let v84 = store.parse_install_version("8.4").unwrap();
        assert_eq!(render(&Route::VersionInstall(v84), &store).unwrap(), template);

        let v82 = store.parse_dedicated_version("8.2").unwrap();
        assert_eq!(
            render(&Route::Dedicated(v82.clone()), &store).unwrap(),
            store.dedicated(&v82).unwrap().content()
        );

        assert_eq!(
            render(&Route::Named("laravel".to_string()), &store).unwrap(),
            store.named("laravel").unwrap().content()
        );
        assert!(render(&Route::Named("symfony".to_string()), &store).is_err());
    }

    #[test]
    fn test_into_bytes() {
        assert_eq!(into_bytes(Cow::Borrowed("abc")), "abc");
        assert_eq!(into_bytes(Cow::Owned("xyz".to_string())), "xyz");
    }
}
