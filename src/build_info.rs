//! Compile-time build metadata exposed by `replkit --version`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("REPLKIT_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("REPLKIT_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `replkit --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("REPLKIT_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("REPLKIT_BUILD_TIMESTAMP")
);

/// `--version` text: version line plus commit and build time.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("REPLKIT_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("REPLKIT_BUILD_TIMESTAMP")
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_version_includes_all_fields() {
        // Version output must include all embedded metadata fields.
        assert!(LONG_VERSION.starts_with(VERSION));
        assert!(LONG_VERSION.contains(GIT_COMMIT));
        assert!(LONG_VERSION.contains(BUILD_TIMESTAMP));
    }

    #[test]
    fn help_trailer_names_commit_and_build_time() {
        assert!(HELP_BUILD_METADATA.contains("commit:"));
        assert!(HELP_BUILD_METADATA.contains("built:"));
    }
}
