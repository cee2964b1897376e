//! Module for all the main functionality in the library (to keep everything sorted)
pub mod download;
pub mod probe;
pub mod saved;
