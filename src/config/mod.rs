//! Configuration management

use clap::Parser;
use std::collections::HashSet;

/// Command-line arguments for bakup
#[derive(Parser, Debug)]
#[command(
    name = "bakup",
    version,
    about = "Incremental backup to S3 object storage"
)]
pub struct Cli {
    /// Local file or directory to back up
    pub source: String,

    /// Destination URI: s3://bucket/key for a single object, or
    /// s3://bucket/prefix/ to place files inside a key prefix
    pub destination: String,

    /// AWS credential profile to load (optional)
    #[arg(long)]
    pub profile: Option<String>,

    /// Use S3 transfer acceleration endpoints
    #[arg(long)]
    pub accelerate: bool,

    /// Always verify by content hash; a matching timestamp tag alone
    /// is never enough to skip a file
    #[arg(long = "force-hash")]
    pub force_hash: bool,
}

/// Global configuration for a backup run
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw source argument (trailing slash is significant)
    pub source: String,

    /// Raw destination URI
    pub destination: String,

    /// Optional AWS credential profile
    pub profile: Option<String>,

    /// Transfer acceleration toggle
    pub accelerate: bool,

    /// Bypass the timestamp short-circuit, always hash
    pub force_hash: bool,

    /// Platform whose reserved file names are skipped during the walk
    pub platform: Platform,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            source: cli.source,
            destination: cli.destination,
            profile: cli.profile,
            accelerate: cli.accelerate,
            force_hash: cli.force_hash,
            platform: Platform::current(),
        }
    }
}

/// Operating systems with known junk-file names.
///
/// Resolved once at startup; the walker receives the resulting name
/// set as plain data and never consults the environment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// OS-generated file names that are never worth backing up.
    pub fn reserved_names(self) -> HashSet<String> {
        let names: &[&str] = match self {
            Platform::Windows => &["$RECYCLE.BIN", "desktop.ini"],
            Platform::MacOs => &[".DS_Store"],
            Platform::Linux => &[],
        };
        names.iter().map(|name| name.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_maps_into_config() {
        let cli = Cli {
            source: "photos/".to_string(),
            destination: "s3://bucket/photos/".to_string(),
            profile: Some("backup".to_string()),
            accelerate: true,
            force_hash: true,
        };

        let config = Config::from(cli);
        assert_eq!(config.source, "photos/");
        assert_eq!(config.destination, "s3://bucket/photos/");
        assert_eq!(config.profile.as_deref(), Some("backup"));
        assert!(config.accelerate);
        assert!(config.force_hash);
    }

    #[test]
    fn test_cli_parses_positionals_and_flags() {
        let cli = Cli::parse_from([
            "bakup",
            "--force-hash",
            "--profile",
            "work",
            "src-dir/",
            "s3://bucket/dest/",
        ]);
        assert_eq!(cli.source, "src-dir/");
        assert_eq!(cli.destination, "s3://bucket/dest/");
        assert_eq!(cli.profile.as_deref(), Some("work"));
        assert!(cli.force_hash);
        assert!(!cli.accelerate);
    }

    #[test]
    fn test_cli_rejects_missing_destination() {
        let result = Cli::try_parse_from(["bakup", "only-source"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_windows_reserved_names() {
        let names = Platform::Windows.reserved_names();
        assert!(names.contains("$RECYCLE.BIN"));
        assert!(names.contains("desktop.ini"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_macos_reserved_names() {
        let names = Platform::MacOs.reserved_names();
        assert!(names.contains(".DS_Store"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_linux_has_no_reserved_names() {
        assert!(Platform::Linux.reserved_names().is_empty());
    }
}
