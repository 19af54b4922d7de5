//! JSON output: per-entity documents and raw sheet dumps.
pub mod dump;
pub mod writer;
