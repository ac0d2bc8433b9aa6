//! Version comparison for CLI and generator compatibility

use anyhow::Result;
use semver::Version;

/// Compare the running CLI version against the version a generator expects.
/// Returns a warning message if the CLI is older.
pub fn check_compatibility(
    generator: &str,
    cli_version: &str,
    min_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    // Unparsable versions can't be compared, skip the warning
    let cli_ver = parse_version(cli_version).ok()?;
    let min_ver = parse_version(min_version).ok()?;

    if cli_ver < min_ver {
        Some(format!(
            "Generator '{}' was written for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            generator, min_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, accepting a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install kitgen --force";

    #[test]
    fn test_cli_older_than_generator() {
        let warning = check_compatibility("nextApp", "0.1.0", "0.2.0", UPGRADE);
        assert!(warning.is_some());
        let warning = warning.unwrap();
        assert!(warning.contains("0.2.0"));
        assert!(warning.contains("nextApp"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(check_compatibility("nextApp", "0.1.0", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("nextApp", "0.2.0", "v0.1.0", UPGRADE).is_none());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(check_compatibility("nextApp", "invalid", "0.1.0", UPGRADE).is_none());
    }
}
