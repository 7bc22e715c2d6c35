//! Test data builders

mod tag;

pub use tag::TagBuilder;
