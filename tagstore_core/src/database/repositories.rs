//! SQLite repository implementations

pub mod tag;

pub use tag::SqliteTagRepository;
