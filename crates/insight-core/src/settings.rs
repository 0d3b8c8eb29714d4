use clap::Parser;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{InsightError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Codeforces practice analytics in the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cf-insight",
    about = "Codeforces practice analytics in the terminal",
    version
)]
pub struct Settings {
    /// Codeforces handle to analyze
    pub handle: String,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary"])]
    pub view: String,

    /// Timezone for displayed timestamps (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Time format
    #[arg(long, default_value = "auto", value_parser = ["12h", "24h", "auto"])]
    pub time_format: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Number of tags shown in the tag chart and summary (1-50)
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u16).range(1..=50))]
    pub top_tags: u16,

    /// HTTP request timeout in seconds (1-300)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: u64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

impl Settings {
    /// The timezone to display timestamps in: the configured IANA name, or
    /// the detected system timezone when set to `"auto"`.
    pub fn resolve_timezone(&self) -> String {
        if self.timezone == "auto" {
            crate::time_utils::get_system_timezone()
        } else {
            self.timezone.clone()
        }
    }
}

// ── Handle validation ──────────────────────────────────────────────────────────

/// Codeforces handles are 3-24 characters of letters, digits, `_`, `.`, `-`.
const HANDLE_PATTERN: &str = r"^[A-Za-z0-9_.\-]{3,24}$";

/// Validate a handle before it is interpolated into a request URL.
pub fn validate_handle(handle: &str) -> Result<()> {
    static HANDLE_RE: OnceLock<Regex> = OnceLock::new();
    let re = HANDLE_RE.get_or_init(|| {
        Regex::new(HANDLE_PATTERN).expect("handle pattern is a valid regex")
    });
    if re.is_match(handle) {
        Ok(())
    } else {
        Err(InsightError::InvalidHandle(handle.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // ── validate_handle ──────────────────────────────────────────────────────

    #[test]
    fn test_validate_handle_accepts_typical_handles() {
        assert!(validate_handle("tourist").is_ok());
        assert!(validate_handle("Md_Almizan").is_ok());
        assert!(validate_handle("user.name-42").is_ok());
    }

    #[test]
    fn test_validate_handle_rejects_too_short() {
        assert!(validate_handle("ab").is_err());
        assert!(validate_handle("").is_err());
    }

    #[test]
    fn test_validate_handle_rejects_too_long() {
        let long = "a".repeat(25);
        assert!(validate_handle(&long).is_err());
    }

    #[test]
    fn test_validate_handle_rejects_url_metacharacters() {
        assert!(validate_handle("a&b=c").is_err());
        assert!(validate_handle("name with space").is_err());
        assert!(validate_handle("semi;colon").is_err());
    }

    // ── Settings ─────────────────────────────────────────────────────────────

    #[test]
    fn test_cli_definition_is_consistent() {
        Settings::command().debug_assert();
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::parse_from(["cf-insight", "tourist"]);
        assert_eq!(settings.handle, "tourist");
        assert_eq!(settings.view, "dashboard");
        assert_eq!(settings.timezone, "auto");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.top_tags, 15);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_settings_explicit_flags() {
        let settings = Settings::parse_from([
            "cf-insight",
            "tourist",
            "--view",
            "summary",
            "--timezone",
            "Asia/Dhaka",
            "--top-tags",
            "10",
        ]);
        assert_eq!(settings.view, "summary");
        assert_eq!(settings.timezone, "Asia/Dhaka");
        assert_eq!(settings.top_tags, 10);
    }

    #[test]
    fn test_resolve_timezone_explicit() {
        let settings = Settings::parse_from([
            "cf-insight",
            "tourist",
            "--timezone",
            "Europe/Berlin",
        ]);
        assert_eq!(settings.resolve_timezone(), "Europe/Berlin");
    }

    #[test]
    fn test_resolve_timezone_auto_is_nonempty() {
        let settings = Settings::parse_from(["cf-insight", "tourist"]);
        assert!(!settings.resolve_timezone().is_empty());
    }
}
