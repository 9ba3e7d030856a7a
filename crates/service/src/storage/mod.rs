//! Storage abstractions for service layer
//!
//! The record file persists the whole record set as one JSON array and is
//! always read and replaced in full.

pub mod record_file;
