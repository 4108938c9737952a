//! Contains the trait and implementations for objects that store the income
//! source collections.

mod source;

pub mod sqlite;

pub use source::{Collection, SourceStore};
