//! Batch creation error types

use thiserror::Error;

/// Errors raised by ordered batch creation
#[derive(Error, Debug)]
pub enum BatchError {
    /// A fail-fast batch stopped at the first failing name
    #[error(
        "Batch aborted at '{failed_name}' (position {position}) after {completed} tag(s) were created: {source}"
    )]
    Aborted {
        failed_name: String,
        position: usize,
        completed: usize,
        #[source]
        source: Box<super::Error>,
    },
}

impl BatchError {
    /// Create an aborted batch error
    pub fn aborted(
        failed_name: &str,
        position: usize,
        completed: usize,
        source: super::Error,
    ) -> Self {
        Self::Aborted {
            failed_name: failed_name.to_string(),
            position,
            completed,
            source: Box::new(source),
        }
    }
}
