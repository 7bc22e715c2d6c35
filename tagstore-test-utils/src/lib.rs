//! Test utilities for tagstore
//!
//! This crate provides repository and digest doubles plus builders for
//! exercising reconciliation and batch creation.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::TagBuilder;
pub use mocks::{MockDigest, RecordingRepository, RepoOp};
