mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use anyhow::Result;
use tagstore_core::Tag;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Trait for tag formatters
pub trait OutputFormatter: Send + Sync {
    fn format_single(&self, tag: &Tag) -> Result<String>;

    /// Format a list of tags
    fn format_batch(&self, tags: &[&Tag]) -> Result<String> {
        let formatted: Result<Vec<String>> = tags.iter().map(|t| self.format_single(t)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
