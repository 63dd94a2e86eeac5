//! Storage abstractions for service layer
//!
//! File-backed document collections used by the default (`file`) backend.

pub mod json_collection;
