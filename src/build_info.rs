//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        // YYYY-MM-DD unless overridden by CI
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_mentions_commit_and_date() {
        assert!(VERSION_LINE.contains(BUILD_COMMIT));
        assert!(VERSION_LINE.contains(BUILD_DATE));
        assert!(VERSION_LINE.starts_with(env!("CARGO_PKG_VERSION")));
    }
}
