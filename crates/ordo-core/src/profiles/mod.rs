//! Active profile selection.

/// Property holding the comma-separated list of active profiles.
pub const PROFILE_KEY: &str = "ordo.profile";

/// Split a profile list on commas, trimming blanks and dropping repeats.
///
/// Order is preserved: the first profile has the highest precedence.
pub fn parse_profiles(value: &str) -> Vec<String> {
    let mut profiles: Vec<String> = Vec::new();
    for profile in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !profiles.iter().any(|p| p == profile) {
            profiles.push(profile.to_string());
        }
    }
    profiles
}

/// The `%profile.` prefix for `profile`.
pub fn prefix(profile: &str) -> String {
    format!("%{}.", profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profiles_keeps_order() {
        assert_eq!(parse_profiles("prod, cloud"), vec!["prod", "cloud"]);
    }

    #[test]
    fn test_parse_profiles_drops_blanks_and_repeats() {
        assert_eq!(parse_profiles(" ,dev,,dev , test"), vec!["dev", "test"]);
        assert!(parse_profiles("").is_empty());
    }

    #[test]
    fn test_prefix() {
        assert_eq!(prefix("prod"), "%prod.");
    }
}
