use colored::*;
use std::error::Error as StdError;
use std::fmt;
use tagstore_core::error::PersistenceError;

/// CLI-specific error type with semantic exit codes
#[derive(Debug)]
pub struct CliError {
    message: String,
    category: ErrorCategory,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Error categories that map to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Storage,
}

/// Semantic exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    GeneralError = 1,
    Misuse = 2,
    StorageError = 4,
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'tagstore --help' for usage information".to_string());
        error
    }

    pub fn storage(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Storage);
        error.suggestions.push(
            "Check that the database path in 'tagstore config get storage.database_path' is writable"
                .to_string(),
        );
        error
    }

    /// Classify a core error by its category
    pub fn from_core(error: tagstore_core::Error) -> Self {
        use tagstore_core::Error;

        let message = error.to_string();
        let mut cli_error = match &error {
            Error::Validation(_) => Self::misuse(&message),
            Error::Persistence(PersistenceError::Storage { .. }) => Self::storage(&message),
            Error::Batch(_) => {
                let mut e = Self::general(&message);
                e.suggestions.push(
                    "Tags before the failed name were created; re-run with the remaining names"
                        .to_string(),
                );
                e
            }
            Error::Persistence(_) | Error::Hashing(_) => Self::general(&message),
        };
        cli_error.source = Some(Box::new(error));
        cli_error
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.category {
            ErrorCategory::General => ExitCode::GeneralError,
            ErrorCategory::Misuse => ExitCode::Misuse,
            ErrorCategory::Storage => ExitCode::StorageError,
        }
    }

    fn label(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Storage => "Storage Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::Misuse => self.label().yellow(),
            _ => self.label().red(),
        };
        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = source.source();
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.message)
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<tagstore_core::Error> for CliError {
    fn from(error: tagstore_core::Error) -> Self {
        Self::from_core(error)
    }
}

/// Convert anyhow errors, keeping the category of a wrapped core error
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let message = format!("{error:#}");
        match error.downcast::<tagstore_core::Error>() {
            Ok(core) => Self::from_core(core),
            Err(_) => Self::general(&message),
        }
    }
}
