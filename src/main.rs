use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tripflow::{
    Command, Config, FileStorage, MarkdownProcessor, MemoryFileStorage, OutputFormat,
    ProcessedContent,
};

/// MIME type recorded for uploaded itineraries.
const MARKDOWN_MIME: &str = "text/markdown";

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_level);

    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Render { input, format } => render(&config, input, *format),
        Command::Upload { file } => upload(&config, file),
        Command::Process { path, format } => process(&config, path, *format),
        Command::Info { path } => info_file(&config, path),
        Command::Delete { path } => delete(&config, path),
    }
}

/// Installs the stderr subscriber; `RUST_LOG` overrides `--log-level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Processes a local file or stdin without touching storage.
fn render(config: &Config, input: &Path, format: OutputFormat) -> Result<()> {
    let bytes = if input.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read markdown from stdin")?;
        buffer
    } else {
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?
    };

    let processor = MarkdownProcessor::with_renderer(MemoryFileStorage::new(), config.renderer());
    let content = processor
        .process_bytes(&bytes)
        .context("Failed to process markdown")?;

    print_content(&content, format)
}

fn upload(config: &Config, file: &Path) -> Result<()> {
    let storage = config
        .storage_config()
        .open()
        .context("Failed to open file storage")?;

    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name: {}", file.display()))?;

    let mut reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let path = storage
        .upload_file(&mut reader, filename, MARKDOWN_MIME)
        .context("Failed to upload file")?;

    info!(source = %file.display(), path = %path, "uploaded itinerary");
    println!("{path}");
    Ok(())
}

fn process(config: &Config, path: &str, format: OutputFormat) -> Result<()> {
    let storage = config
        .storage_config()
        .open()
        .context("Failed to open file storage")?;

    let processor = MarkdownProcessor::with_renderer(storage, config.renderer());
    let content = processor
        .process_stored_file(path)
        .with_context(|| format!("Failed to process markdown file: {path}"))?;

    print_content(&content, format)
}

fn info_file(config: &Config, path: &str) -> Result<()> {
    let storage = config
        .storage_config()
        .open()
        .context("Failed to open file storage")?;

    let info = storage
        .file_info(path)
        .with_context(|| format!("Failed to read file info: {path}"))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&info).context("Failed to serialize file info")?
    );
    Ok(())
}

fn delete(config: &Config, path: &str) -> Result<()> {
    let storage = config
        .storage_config()
        .open()
        .context("Failed to open file storage")?;

    storage
        .delete_file(path)
        .with_context(|| format!("Failed to delete file: {path}"))?;

    info!(path, "deleted stored file");
    Ok(())
}

fn print_content(content: &ProcessedContent, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(content).context("Failed to serialize content")?
        ),
        OutputFormat::Html => print!("{}", content.html_content),
    }
    Ok(())
}
