// Preset scripts compiled into the binary

const BUNDLED: &[(&str, &str)] = &[
    ("php", include_str!("../../presets/php.sh")),
    ("php7.4", include_str!("../../presets/php7.4.sh")),
    ("php8.1", include_str!("../../presets/php8.1.sh")),
    ("php8.2", include_str!("../../presets/php8.2.sh")),
    ("php8.3", include_str!("../../presets/php8.3.sh")),
    ("laravel", include_str!("../../presets/laravel.sh")),
];

/// Bundled script for an asset name (`php`, `php8.2`, `laravel`)
pub fn lookup(name: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(asset, _)| *asset == name)
        .map(|(_, content)| *content)
}
