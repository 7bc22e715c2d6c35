use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use tagstore_core::{Tag, TrashState};

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    /// One line per tag: `<id>  <name>  [profile]`, with the trash state
    /// appended when the tag is not active
    fn format_single(&self, tag: &Tag) -> Result<String> {
        let id = self.colorize(tag.id.as_deref().unwrap_or("-"), |s| s.cyan());
        let mut line = format!("{id}  {}  [{}]", tag.name, tag.profile_id);

        if tag.trash_state != TrashState::Active {
            let state = self.colorize(&tag.trash_state.to_string(), |s| s.yellow());
            line.push_str(&format!("  ({state})"));
        }

        if !tag.attributes.is_empty() {
            line.push_str(&format!("  {}", serde_json::to_string(&tag.attributes)?));
        }

        Ok(line)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, tag: &Tag) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(tag)?)
        } else {
            Ok(serde_json::to_string(tag)?)
        }
    }

    fn format_batch(&self, tags: &[&Tag]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(tags)?)
        } else {
            Ok(serde_json::to_string(tags)?)
        }
    }
}
