//! Mock implementations for testing

mod digest;
mod repository;

pub use digest::MockDigest;
pub use repository::{RecordingRepository, RepoOp};
