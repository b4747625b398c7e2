//! Format constants and defaults shared across the crate.

/// Current output schema version for generated workload documents
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Line-leading character marking header/annotation lines in SWF traces
pub const COMMENT_MARKER: char = ';';

/// Number of columns in a well-formed Standard Workload Format record
pub const STANDARD_FIELD_COUNT: usize = 18;

// Default input/output transfer size of a synthesized job, in bytes.
// Matches the Ethernet MTU, which simulators use as a neutral file size.
pub const DEFAULT_TRANSFER_SIZE: i64 = 1500;

// Suffixes that select a decompression strategy (compared case-insensitively)
pub const GZIP_SUFFIXES: &[&str] = &[".gz", ".gzip"];
pub const ZIP_SUFFIXES: &[&str] = &[".zip"];

/// gzip magic bytes (RFC 1952)
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Local file header signature that opens every non-empty zip archive
pub const ZIP_MAGIC: [u8; 4] = [b'P', b'K', 0x03, 0x04];
