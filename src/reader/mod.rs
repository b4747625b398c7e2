//! Trace ingestion: source lookup, decompression and line tokenization.
//!
//! This module handles:
//! - Resolving a trace name to a byte stream
//! - Unwrapping gzip and zip containers transparently
//! - Skipping blank and comment lines
//! - Splitting data lines into whitespace-delimited fields

pub mod codec;
pub mod source;
pub mod stream;

// Re-export main types
pub use codec::Codec;
pub use source::{FsResolver, MemoryResolver, ResourceResolver};
pub use stream::{tokenize, TraceRecord, TraceStreamReader};
