//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::markdown::MarkdownRenderer;
use crate::storage::StorageConfig;

/// Log levels accepted by `--log-level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Extensions accepted for itinerary uploads.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Command line configuration for Tripflow.
#[derive(Debug, Clone, Parser)]
#[command(name = "tripflow", version, about, long_about = None)]
pub struct Config {
    /// Storage directory for uploaded files
    #[arg(long, env = "FILE_STORAGE_BASE_DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Forward raw HTML in markdown to the sanitizer instead of omitting it
    #[arg(long, global = true)]
    pub allow_raw_html: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Tripflow subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render a local markdown file, or stdin when given `-`
    Render {
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Upload a markdown itinerary into storage
    Upload { file: PathBuf },
    /// Render a stored markdown file
    Process {
        path: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Show size and MIME type of a stored file
    Info { path: String },
    /// Delete a stored file
    Delete { path: String },
}

/// Output rendering for processed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Title, description, HTML and internal images as JSON
    Json,
    /// Sanitized HTML body only
    Html,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the log level is unknown, or an upload names a file
    /// that does not exist or is not markdown.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "Unknown log level: {} (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        if let Command::Upload { file } = &self.command {
            if !is_markdown_file(file) {
                bail!(
                    "Only markdown files (.md, .markdown) are allowed: {}",
                    file.display()
                );
            }
            if !file.is_file() {
                bail!("File does not exist: {}", file.display());
            }
        }

        Ok(())
    }

    /// Returns storage configuration, falling back to environment defaults.
    pub fn storage_config(&self) -> StorageConfig {
        match &self.storage_dir {
            Some(dir) => StorageConfig::new(dir),
            None => StorageConfig::from_env(),
        }
    }

    /// Builds markdown renderer honouring `--allow-raw-html`.
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::new().with_raw_html(self.allow_raw_html)
    }
}

/// Checks whether a path has a markdown extension, ignoring case.
pub fn is_markdown_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["tripflow", "--log-level", "info"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).expect("Should parse arguments")
    }

    #[test]
    fn test_parse_render_defaults_to_json() {
        // Arrange & Act
        let config = parse(&["render", "trip.md"]);

        // Assert
        match config.command {
            Command::Render { input, format } => {
                assert_eq!(input, PathBuf::from("trip.md"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("Expected render command, got {:?}", other),
        }
        assert!(!config.allow_raw_html);
    }

    #[test]
    fn test_parse_process_html_format() {
        // Arrange & Act
        let config = parse(&["process", "uploads/a.md", "--format", "html"]);

        // Assert
        match config.command {
            Command::Process { path, format } => {
                assert_eq!(path, "uploads/a.md");
                assert_eq!(format, OutputFormat::Html);
            }
            other => panic!("Expected process command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        // Arrange & Act
        let config = parse(&["info", "uploads/a.md", "--storage-dir", "/srv/files", "--allow-raw-html"]);

        // Assert
        assert_eq!(config.storage_dir, Some(PathBuf::from("/srv/files")));
        assert!(config.allow_raw_html);
        assert!(config.renderer().allows_raw_html());
        assert_eq!(config.storage_config().base_dir, PathBuf::from("/srv/files"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        // Arrange
        let mut config = parse(&["delete", "uploads/a.md"]);
        config.log_level = "verbose".to_string();

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_uppercase_log_level() {
        // Arrange
        let mut config = parse(&["delete", "uploads/a.md"]);
        config.log_level = "DEBUG".to_string();

        // Act & Assert
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_markdown_upload() {
        // Arrange
        let config = parse(&["upload", "Cargo.toml"]);

        // Act
        let result = config.validate();

        // Assert
        let message = result.expect_err("Should reject").to_string();
        assert!(message.contains("Only markdown files"), "{}", message);
    }

    #[test]
    fn test_validate_rejects_missing_upload() {
        // Arrange
        let config = parse(&["upload", "does-not-exist.md"]);

        // Act
        let result = config.validate();

        // Assert
        let message = result.expect_err("Should reject").to_string();
        assert!(message.contains("does not exist"), "{}", message);
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file("trip.md"));
        assert!(is_markdown_file("trip.MD"));
        assert!(is_markdown_file("dir/trip.markdown"));
        assert!(!is_markdown_file("trip.txt"));
        assert!(!is_markdown_file("md"));
        assert!(!is_markdown_file("trip.md.exe"));
    }
}
