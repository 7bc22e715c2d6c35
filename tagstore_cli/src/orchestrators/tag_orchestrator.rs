//! Tag command orchestrator
//!
//! Opens the configured store and renders command results. Every method
//! returns the text destined for stdout; diagnostics go to stderr.

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, create_formatter};
use anyhow::Context;
use colored::*;
use log::debug;
use std::sync::Arc;
use tagstore_core::{Attributes, Database, Tag, TagStore};

/// Orchestrator for the tag commands
pub struct TagOrchestrator {
    store: TagStore,
    use_color: bool,
}

impl TagOrchestrator {
    /// Open the SQLite store named by the configuration
    pub async fn new(config: &AppConfig, use_color: bool) -> CliResult<Self> {
        let db_path = config.database_path();
        debug!("Opening tag database at: {}", db_path.display());

        let db = Database::new(&db_path).await?;
        let store = TagStore::new(config.tags.clone(), Arc::new(db.tag_repository()));

        Ok(Self::with_store(store, use_color))
    }

    pub fn with_store(store: TagStore, use_color: bool) -> Self {
        Self { store, use_color }
    }

    pub fn store(&self) -> &TagStore {
        &self.store
    }

    /// Create `names` in `profile_id`, one after another
    pub async fn add(
        &self,
        profile_id: &str,
        names: &[String],
        shared: &Attributes,
        format: OutputFormat,
    ) -> CliResult<String> {
        debug!(
            "Adding {} tag(s) to profile {profile_id} with policy {:?}",
            names.len(),
            self.store.config().failure_policy
        );

        let report = self.store.add_tags(profile_id, names, shared).await?;
        let output = self.render(&report.created(), format)?;

        let failures = report.failures();
        if failures.is_empty() {
            return Ok(output);
        }

        // Best-effort runs get here; show what was created before failing
        if !output.is_empty() {
            println!("{output}");
        }
        for (name, error) in &failures {
            eprintln!("{} {name}: {error}", "failed".red());
        }
        Err(CliError::general(&format!(
            "{} of {} tag(s) could not be created",
            failures.len(),
            names.len()
        )))
    }

    pub async fn rename(&self, from: &str, to: &str, format: OutputFormat) -> CliResult<String> {
        let tag = self.store.rename(from, to).await?;
        self.render(&[&tag], format)
    }

    /// Move a tag to the trash, or flag it for purging when `purge` is set
    pub async fn trash(&self, name: &str, purge: bool, format: OutputFormat) -> CliResult<String> {
        let tag = if purge {
            self.store.mark_for_purge(name).await?
        } else {
            self.store.trash(name).await?
        };
        self.render(&[&tag], format)
    }

    pub async fn restore(&self, name: &str, format: OutputFormat) -> CliResult<String> {
        let tag = self.store.restore(name).await?;
        self.render(&[&tag], format)
    }

    pub async fn list(&self, profile_id: Option<&str>, format: OutputFormat) -> CliResult<String> {
        let tags = self.store.list(profile_id).await?;
        let refs: Vec<&Tag> = tags.iter().collect();
        self.render(&refs, format)
    }

    /// Canonical id for `name`; nothing is read or written
    pub async fn id(&self, name: &str) -> CliResult<String> {
        Ok(self.store.compute_id(name).await?)
    }

    fn render(&self, tags: &[&Tag], format: OutputFormat) -> CliResult<String> {
        let formatter = create_formatter(format, self.use_color);
        Ok(formatter.format_batch(tags)?)
    }
}

/// Parse `KEY=VALUE` pairs into shared attributes
///
/// Values that parse as JSON keep their type; anything else is a string.
pub fn parse_attributes(pairs: &[String]) -> CliResult<Attributes> {
    let mut attributes = Attributes::new();

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .with_context(|| format!("Attribute '{pair}' must look like KEY=VALUE"))
            .map_err(|e| CliError::misuse(&format!("{e:#}")))?;

        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        attributes.insert(key.trim().to_string(), value);
    }

    Ok(attributes)
}
