//! Platform character encoding detection.

/// Encoding used when the environment does not name one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Locale variables consulted in priority order.
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];

/// Resolve the platform default encoding from the process locale.
///
/// Falls back to [`DEFAULT_ENCODING`] when no locale variable is set or
/// none of them names a codeset.
pub fn platform_default_encoding() -> String {
    LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| encoding_from_locale(&locale))
        .unwrap_or_else(|| DEFAULT_ENCODING.to_string())
}

/// Extract the codeset from a POSIX locale name.
///
/// `en_US.UTF-8` yields `UTF-8`, `de_DE.ISO-8859-1@euro` yields `ISO-8859-1`.
/// The `C` and `POSIX` locales are plain ASCII.
pub fn encoding_from_locale(locale: &str) -> Option<String> {
    if locale == "C" || locale == "POSIX" {
        return Some("US-ASCII".to_string());
    }

    let (_, codeset) = locale.split_once('.')?;
    let codeset = codeset.split('@').next().unwrap_or(codeset);
    if codeset.is_empty() {
        return None;
    }

    match codeset.to_ascii_lowercase().as_str() {
        "utf8" | "utf-8" => Some(DEFAULT_ENCODING.to_string()),
        _ => Some(codeset.to_ascii_uppercase()),
    }
}
