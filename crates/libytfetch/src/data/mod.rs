//! Module for the plain data types used across the library

pub mod media_entry;
pub mod url_kind;
