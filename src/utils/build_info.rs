//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!(
        "{} {} ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_package() {
        assert!(version_line().starts_with("flappy "));
    }
}
