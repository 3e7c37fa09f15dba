//! Runtime metadata reported alongside validation requests.

use std::env;

/// OS label in the form the reporting endpoint expects.
pub fn os_name() -> &'static str {
    match env::consts::OS {
        "windows" => "Windows",
        "macos" => "OSX",
        "linux" => "Linux",
        other => other,
    }
}

pub fn arch() -> &'static str {
    env::consts::ARCH
}

pub fn os_description() -> String {
    format!("{} {}", env::consts::OS, env::consts::ARCH)
}

/// Best-effort BCP 47 language tag for the current process locale, falling
/// back to `en-US` when no usable locale variable is set.
pub fn current_locale() -> String {
    locale_from_env().unwrap_or_else(|| "en-US".to_string())
}

fn locale_from_env() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|raw| normalize_locale(&raw))
}

// "en_US.UTF-8" -> "en-US"
fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw.split('.').next()?.trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_posix_locale_strings() {
        assert_eq!(normalize_locale("en_US.UTF-8"), Some("en-US".to_string()));
        assert_eq!(normalize_locale("de_CH"), Some("de-CH".to_string()));
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn locale_always_yields_a_tag() {
        assert!(!current_locale().is_empty());
    }
}
