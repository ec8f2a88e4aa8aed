use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_incoming_dir")]
    pub incoming_dir: PathBuf,
    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,
    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,
}

fn default_incoming_dir() -> PathBuf {
    PathBuf::from("input_videos")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("output_videos")
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("downloads")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            incoming_dir: default_incoming_dir(),
            processed_dir: default_processed_dir(),
            downloads_dir: default_downloads_dir(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

impl AppConfig {
    /// Create the three managed directories if they do not exist yet.
    pub fn ensure_directories(&self) -> io::Result<()> {
        for dir in [&self.incoming_dir, &self.processed_dir, &self.downloads_dir] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn dir(&self, source: SourceDir) -> &Path {
        match source {
            SourceDir::Incoming => &self.incoming_dir,
            SourceDir::Processed => &self.processed_dir,
        }
    }
}

/// The two managed directories a file can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDir {
    Incoming,
    Processed,
}

impl SourceDir {
    /// Lowercase name used in archive file names and log lines.
    pub fn label(self) -> &'static str {
        match self {
            SourceDir::Incoming => "incoming",
            SourceDir::Processed => "processed",
        }
    }

    /// Bracketed tag shown in front of preview candidates.
    pub fn tag(self) -> &'static str {
        match self {
            SourceDir::Incoming => "[Incoming]",
            SourceDir::Processed => "[Processed]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_directories() {
        let config = AppConfig::default();
        assert_eq!(config.incoming_dir, PathBuf::from("input_videos"));
        assert_eq!(config.processed_dir, PathBuf::from("output_videos"));
        assert_eq!(config.downloads_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn test_ensure_directories_creates_all_three() {
        let tmp = tempdir().unwrap();
        let config = AppConfig {
            incoming_dir: tmp.path().join("in"),
            processed_dir: tmp.path().join("out"),
            downloads_dir: tmp.path().join("dl"),
        };

        config.ensure_directories().unwrap();

        assert!(config.incoming_dir.is_dir());
        assert!(config.processed_dir.is_dir());
        assert!(config.downloads_dir.is_dir());

        // Idempotent over existing directories
        config.ensure_directories().unwrap();
    }

    #[test]
    fn test_source_dir_labels() {
        assert_eq!(SourceDir::Incoming.label(), "incoming");
        assert_eq!(SourceDir::Processed.label(), "processed");
        assert_eq!(SourceDir::Incoming.tag(), "[Incoming]");
        assert_eq!(SourceDir::Processed.tag(), "[Processed]");
    }
}
