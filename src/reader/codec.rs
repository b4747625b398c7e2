//! Decompression strategies for trace sources.
//!
//! A trace arrives as raw text, gzip-compressed text or a zip archive holding
//! the text as its first file entry. The strategy is picked from the name
//! suffix when it names a container, otherwise from the leading bytes.
//!
//! Every strategy hands back a `BufRead` over the decoded text so the line
//! reader never needs to know which container it came from.

use crate::utils::config::{GZIP_MAGIC, GZIP_SUFFIXES, ZIP_MAGIC, ZIP_SUFFIXES};
use crate::utils::error::WorkloadError;
use flate2::read::MultiGzDecoder;
use log::debug;
use std::io::{self, BufRead, BufReader, Cursor, Read};

/// Container format of a trace source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Plain delimited text
    Raw,
    /// gzip stream (concatenated members are read as one stream)
    Gzip,
    /// zip archive; the first file entry is the trace
    Zip,
}

/// Bytes inspected to recognise a container (longest signature)
const SNIFF_LEN: usize = ZIP_MAGIC.len();

/// Suffix-keyed strategy table
const SUFFIX_TABLE: &[(&[&str], Codec)] = &[(GZIP_SUFFIXES, Codec::Gzip), (ZIP_SUFFIXES, Codec::Zip)];

impl Codec {
    /// Pick a codec from a file name hint
    ///
    /// **Public** - returns `None` when the suffix names no known container
    pub fn from_name(name: &str) -> Option<Codec> {
        let lower = name.to_ascii_lowercase();
        SUFFIX_TABLE
            .iter()
            .find(|(suffixes, _)| suffixes.iter().any(|s| lower.ends_with(s)))
            .map(|(_, codec)| *codec)
    }

    /// Pick a codec from the first bytes of a stream
    ///
    /// **Public** - anything without a known signature is raw text
    pub fn sniff(header: &[u8]) -> Codec {
        if header.starts_with(&GZIP_MAGIC) {
            Codec::Gzip
        } else if header.starts_with(&ZIP_MAGIC) {
            Codec::Zip
        } else {
            Codec::Raw
        }
    }

    pub fn is_compressed(self) -> bool {
        self != Codec::Raw
    }

    pub fn label(self) -> &'static str {
        match self {
            Codec::Raw => "raw",
            Codec::Gzip => "gzip",
            Codec::Zip => "zip",
        }
    }
}

/// Resolve the codec for a stream and wrap it in the matching decoder
///
/// **Public** - used by `TraceStreamReader::open`
///
/// # Arguments
/// * `reader` - Underlying byte stream, positioned at its start
/// * `name` - File name hint, also used in error messages
///
/// # Errors
/// * `WorkloadError::SourceUnavailable` - The stream cannot be read
/// * `WorkloadError::MalformedArchive` - The container cannot be decoded
pub fn decode(
    mut reader: Box<dyn Read>,
    name: &str,
) -> Result<(Codec, Box<dyn BufRead>), WorkloadError> {
    let mut header = [0u8; SNIFF_LEN];
    let filled = fill_header(&mut reader, &mut header).map_err(|e| unavailable(name, e))?;
    let sniffed = Codec::sniff(&header[..filled]);

    let codec = match Codec::from_name(name) {
        Some(hinted) => {
            if hinted != sniffed {
                return Err(malformed(
                    name,
                    format!("expected {} signature", hinted.label()),
                ));
            }
            hinted
        }
        None => sniffed,
    };

    debug!("Opening trace '{}' as {}", name, codec.label());

    let reader = Cursor::new(header[..filled].to_vec()).chain(reader);

    let decoded: Box<dyn BufRead> = match codec {
        Codec::Raw => Box::new(BufReader::new(reader)),
        Codec::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(reader))),
        Codec::Zip => Box::new(Cursor::new(unzip_first_entry(reader, name)?)),
    };

    Ok((codec, decoded))
}

/// Read up to `header.len()` bytes, stopping early only at end of stream
///
/// **Private** - a single `read` may return fewer bytes than a signature needs
fn fill_header(reader: &mut dyn Read, header: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Extract the first file entry of a zip archive
///
/// **Private** - zip needs a seekable reader, so unlike the raw and gzip
/// paths this is not lazy: the compressed archive and the decompressed entry
/// are both held in memory, roughly archive size plus trace size.
fn unzip_first_entry<R: Read>(mut reader: R, name: &str) -> Result<Vec<u8>, WorkloadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| unavailable(name, e))?;

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| malformed(name, e.to_string()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| malformed(name, e.to_string()))?;

        if entry.is_dir() {
            continue;
        }

        debug!("Reading zip entry '{}' from '{}'", entry.name(), name);

        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(|e| malformed(name, e.to_string()))?;
        return Ok(contents);
    }

    Err(malformed(name, "archive has no file entries".to_string()))
}

pub(crate) fn unavailable(name: &str, source: std::io::Error) -> WorkloadError {
    WorkloadError::SourceUnavailable {
        name: name.to_string(),
        source,
    }
}

pub(crate) fn malformed(name: &str, reason: String) -> WorkloadError {
    WorkloadError::MalformedArchive {
        name: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    /// Hands out at most one byte per read
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_codec_from_name() {
        assert_eq!(Codec::from_name("trace.swf.gz"), Some(Codec::Gzip));
        assert_eq!(Codec::from_name("TRACE.ZIP"), Some(Codec::Zip));
        assert_eq!(Codec::from_name("trace.swf"), None);
        assert_eq!(Codec::from_name(""), None);
    }

    #[test]
    fn test_codec_sniff() {
        assert_eq!(Codec::sniff(&[0x1f, 0x8b, 0x08]), Codec::Gzip);
        assert_eq!(Codec::sniff(b"PK\x03\x04rest"), Codec::Zip);
        assert_eq!(Codec::sniff(b"; header"), Codec::Raw);
        assert_eq!(Codec::sniff(b""), Codec::Raw);
    }

    #[test]
    fn test_decode_raw_passthrough() {
        let (codec, mut decoded) =
            decode(Box::new(Cursor::new(b"1 2 3\n".to_vec())), "trace.swf").unwrap();
        assert_eq!(codec, Codec::Raw);

        let mut text = String::new();
        decoded.read_to_string(&mut text).unwrap();
        assert_eq!(text, "1 2 3\n");
    }

    #[test]
    fn test_decode_rejects_gzip_hint_without_signature() {
        let result = decode(Box::new(Cursor::new(b"plain text".to_vec())), "trace.gz");
        assert!(matches!(result, Err(WorkloadError::MalformedArchive { .. })));
    }

    #[test]
    fn test_decode_rejects_corrupt_zip() {
        let result = decode(Box::new(Cursor::new(b"PK\x03\x04garbage".to_vec())), "trace.zip");
        assert!(matches!(result, Err(WorkloadError::MalformedArchive { .. })));
    }

    #[test]
    fn test_decode_sniffs_across_short_reads() {
        let trickle = || Trickle(Cursor::new(gzip(b"1 2 3\n")));

        for name in ["trace.swf.gz", "trace.swf"] {
            let (codec, mut decoded) = decode(Box::new(trickle()), name).unwrap();
            assert_eq!(codec, Codec::Gzip);

            let mut text = String::new();
            decoded.read_to_string(&mut text).unwrap();
            assert_eq!(text, "1 2 3\n");
        }
    }

    #[test]
    fn test_decode_raw_keeps_sniffed_bytes() {
        let (codec, mut decoded) =
            decode(Box::new(Trickle(Cursor::new(b"7 8\n".to_vec()))), "trace.swf").unwrap();
        assert_eq!(codec, Codec::Raw);

        let mut text = String::new();
        decoded.read_to_string(&mut text).unwrap();
        assert_eq!(text, "7 8\n");
    }

    #[test]
    fn test_decode_stream_shorter_than_signature() {
        let (codec, mut decoded) = decode(Box::new(Cursor::new(b"1\n".to_vec())), "t.swf").unwrap();
        assert_eq!(codec, Codec::Raw);

        let mut text = String::new();
        decoded.read_to_string(&mut text).unwrap();
        assert_eq!(text, "1\n");
    }
}
