pub mod custom;
pub mod manager;

pub use custom::{CustomDictionaryError, CustomWordList};
