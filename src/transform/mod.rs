//! Reshaping of loaded tables into the JSON documents.
pub mod criteria;
pub mod document;
pub mod profile;
pub mod roster;
