//! Byte-resource lookup by logical name.
//!
//! The synthesizer never opens files directly; it asks a `ResourceResolver`
//! for a fresh stream each time it needs one, so a failed attempt can be
//! retried and tests can serve traces from memory.

use super::codec::unavailable;
use crate::utils::error::WorkloadError;
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Maps a logical trace name to an openable byte stream
pub trait ResourceResolver {
    /// Open a fresh stream for `name`
    ///
    /// # Errors
    /// * `WorkloadError::InvalidConfiguration` - Blank name
    /// * `WorkloadError::SourceUnavailable` - Resource missing or unreadable
    fn open(&self, name: &str) -> Result<Box<dyn Read>, WorkloadError>;
}

/// Reject blank resource names before any I/O happens
///
/// **Public** - shared by resolvers and the synthesizer constructor
pub fn validate_name(name: &str) -> Result<(), WorkloadError> {
    if name.trim().is_empty() {
        return Err(WorkloadError::InvalidConfiguration(
            "trace resource name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Resolves names as filesystem paths, optionally under a root directory
#[derive(Debug, Clone, Default)]
pub struct FsResolver {
    root: Option<PathBuf>,
}

impl FsResolver {
    /// Resolve names relative to the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative names against `root`; absolute names are used as-is
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ResourceResolver for FsResolver {
    fn open(&self, name: &str) -> Result<Box<dyn Read>, WorkloadError> {
        validate_name(name)?;

        let path = self.resolve(name);
        debug!("Resolving trace '{}' to {}", name, path.display());

        let file = File::open(&path).map_err(|e| unavailable(name, e))?;
        Ok(Box::new(file))
    }
}

/// Serves traces from in-memory buffers
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of a named buffer
    pub fn with_resource(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(name.into(), bytes.into());
    }
}

impl ResourceResolver for MemoryResolver {
    fn open(&self, name: &str) -> Result<Box<dyn Read>, WorkloadError> {
        validate_name(name)?;

        let bytes = self.resources.get(name).ok_or_else(|| {
            unavailable(
                name,
                io::Error::new(io::ErrorKind::NotFound, "no such in-memory resource"),
            )
        })?;

        Ok(Box::new(Cursor::new(bytes.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(matches!(
            validate_name("   "),
            Err(WorkloadError::InvalidConfiguration(_))
        ));
        assert!(validate_name("trace.swf").is_ok());
    }

    #[test]
    fn test_fs_resolver_joins_root() {
        let resolver = FsResolver::with_root("/data/traces");
        assert_eq!(
            resolver.resolve("kth.swf"),
            PathBuf::from("/data/traces/kth.swf")
        );
        assert_eq!(resolver.resolve("/tmp/x.swf"), PathBuf::from("/tmp/x.swf"));
    }

    #[test]
    fn test_fs_resolver_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = FsResolver::with_root(dir.path());
        let result = resolver.open("missing.swf");
        assert!(matches!(result, Err(WorkloadError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_memory_resolver_serves_fresh_streams() {
        let resolver = MemoryResolver::new().with_resource("a.swf", "1 2 3\n");

        for _ in 0..2 {
            let mut text = String::new();
            resolver
                .open("a.swf")
                .unwrap()
                .read_to_string(&mut text)
                .unwrap();
            assert_eq!(text, "1 2 3\n");
        }

        assert!(matches!(
            resolver.open("b.swf"),
            Err(WorkloadError::SourceUnavailable { .. })
        ));
    }
}
